// src/analyzer.rs
// Sequence analysis and constraint validation, independent of the codec
// pipeline: operates directly on a DNA string. Ported from analyzer.py's
// SequenceAnalyzer.

pub struct Analyzer {
    pub ell: usize,
    pub epsilon: f64,
}

#[derive(Debug, Clone)]
pub struct HomopolymerRun {
    pub nucleotide: char,
    pub start: usize,
    pub length: usize,
}

#[derive(Debug, Clone)]
pub struct Analysis {
    pub sequence: String,
    pub length: usize,
    pub gc_content: f64,
    pub gc_balanced: bool,
    pub gc_target_range: (f64, f64),
    pub max_runlength: usize,
    pub runlength_ok: bool,
    pub runlength_limit: usize,
    pub nucleotide_counts: [(char, usize); 4],
    pub homopolymer_runs: Vec<HomopolymerRun>,
}

impl Analyzer {
    pub fn new(ell: usize, epsilon: f64) -> Self {
        Analyzer { ell, epsilon }
    }

    pub fn compute_gc_content(dna: &str) -> f64 {
        if dna.is_empty() {
            return 0.0;
        }
        let gc = dna
            .chars()
            .filter(|c| matches!(c.to_ascii_uppercase(), 'C' | 'G'))
            .count();
        gc as f64 / dna.chars().count() as f64
    }

    pub fn is_gc_balanced(&self, dna: &str) -> bool {
        (Self::compute_gc_content(dna) - 0.5).abs() <= self.epsilon
    }

    pub fn compute_max_runlength(dna: &str) -> usize {
        let upper: Vec<char> = dna.chars().map(|c| c.to_ascii_uppercase()).collect();
        if upper.is_empty() {
            return 0;
        }
        let mut max_run = 1;
        let mut current = 1;
        for w in upper.windows(2) {
            if w[0] == w[1] {
                current += 1;
                max_run = max_run.max(current);
            } else {
                current = 1;
            }
        }
        max_run
    }

    pub fn check_runlength_constraint(&self, dna: &str) -> bool {
        Self::compute_max_runlength(dna) <= self.ell
    }

    pub fn count_nucleotides(dna: &str) -> [(char, usize); 4] {
        let mut counts = [('A', 0usize), ('T', 0), ('C', 0), ('G', 0)];
        for c in dna.chars().map(|c| c.to_ascii_uppercase()) {
            if let Some(entry) = counts.iter_mut().find(|(n, _)| *n == c) {
                entry.1 += 1;
            }
        }
        counts
    }

    pub fn find_homopolymer_runs(dna: &str) -> Vec<HomopolymerRun> {
        let upper: Vec<char> = dna.chars().map(|c| c.to_ascii_uppercase()).collect();
        if upper.is_empty() {
            return Vec::new();
        }

        let mut runs = Vec::new();
        let mut current_nucleotide = upper[0];
        let mut current_start = 0;
        let mut current_length = 1;

        for (i, &nucleotide) in upper.iter().enumerate().skip(1) {
            if nucleotide == current_nucleotide {
                current_length += 1;
            } else {
                if current_length > 1 {
                    runs.push(HomopolymerRun {
                        nucleotide: current_nucleotide,
                        start: current_start,
                        length: current_length,
                    });
                }
                current_nucleotide = nucleotide;
                current_start = i;
                current_length = 1;
            }
        }
        if current_length > 1 {
            runs.push(HomopolymerRun {
                nucleotide: current_nucleotide,
                start: current_start,
                length: current_length,
            });
        }
        runs
    }

    pub fn analyze_dna(&self, dna: &str) -> Analysis {
        let gc_content = Self::compute_gc_content(dna);
        Analysis {
            sequence: dna.to_string(),
            length: dna.chars().count(),
            gc_content,
            gc_balanced: self.is_gc_balanced(dna),
            gc_target_range: (0.5 - self.epsilon, 0.5 + self.epsilon),
            max_runlength: Self::compute_max_runlength(dna),
            runlength_ok: self.check_runlength_constraint(dna),
            runlength_limit: self.ell,
            nucleotide_counts: Self::count_nucleotides(dna),
            homopolymer_runs: Self::find_homopolymer_runs(dna),
        }
    }
}

pub fn print_analysis(analysis: &Analysis) {
    println!();
    println!("Sequence Analysis");
    println!("{}", "=".repeat(70));
    println!("DNA Sequence:     {}", analysis.sequence);
    println!("Length:           {} bp", analysis.length);
    println!();
    println!("GC-Content:       {:.2}%", analysis.gc_content * 100.0);
    println!("GC-Balanced:      {}", analysis.gc_balanced);
    println!(
        "Target Range:     {:.2}% - {:.2}%",
        analysis.gc_target_range.0 * 100.0,
        analysis.gc_target_range.1 * 100.0
    );
    println!();
    println!("Max Runlength:    {}", analysis.max_runlength);
    println!("Runlength OK:     {}", analysis.runlength_ok);
    println!("Runlength Limit:  {}", analysis.runlength_limit);
    println!();
    println!("Nucleotide Counts:");
    for (nucleotide, count) in analysis.nucleotide_counts {
        let pct = if analysis.length > 0 {
            count as f64 / analysis.length as f64 * 100.0
        } else {
            0.0
        };
        println!("  {nucleotide}: {count:3} ({pct:5.1}%)");
    }

    if !analysis.homopolymer_runs.is_empty() {
        println!();
        println!("Homopolymer Runs:");
        for run in &analysis.homopolymer_runs {
            println!(
                "  {} x {} at position {}",
                run.nucleotide, run.length, run.start
            );
        }
    }
    println!("{}", "=".repeat(70));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gc_content_known_vector() {
        assert_eq!(Analyzer::compute_gc_content("ATCG"), 0.5);
        assert_eq!(Analyzer::compute_gc_content(""), 0.0);
    }

    #[test]
    fn max_runlength_detects_homopolymers() {
        assert_eq!(Analyzer::compute_max_runlength("AATTT"), 3);
        assert_eq!(Analyzer::compute_max_runlength("ATCG"), 1);
    }

    #[test]
    fn finds_homopolymer_runs_with_positions() {
        let runs = Analyzer::find_homopolymer_runs("AATTTCG");
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].nucleotide, 'A');
        assert_eq!(runs[0].start, 0);
        assert_eq!(runs[0].length, 2);
        assert_eq!(runs[1].nucleotide, 'T');
        assert_eq!(runs[1].start, 2);
        assert_eq!(runs[1].length, 3);
    }

    #[test]
    fn balanced_within_epsilon() {
        let analyzer = Analyzer::new(3, 0.05);
        assert!(analyzer.is_gc_balanced("ATCG"));
        assert!(!analyzer.is_gc_balanced("GGGGGGGG"));
    }
}
