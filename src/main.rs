// src/main.rs
// HELIX: constrained-code DNA storage codec.
// Entry point for the Command Line Interface.

mod cli;

use crate::cli::{Cli, Commands};
use helix::analyzer::{self, Analyzer};
use helix::symbol::Nucleotide;
use helix::{codec, HelixError};

use anyhow::{Context, Result};
use clap::Parser;
use rand::Rng;
use rayon::prelude::*;
use std::fs;
use std::io::Write;

fn read_input(input: Option<String>, file: Option<String>, what: &str) -> Result<String> {
    if let Some(s) = input {
        Ok(s.trim().to_string())
    } else if let Some(path) = file {
        let content = fs::read_to_string(&path).context(format!("failed to read {path}"))?;
        Ok(content.trim().to_string())
    } else {
        anyhow::bail!("must provide either -i/--input or -f/--file ({what})");
    }
}

fn write_output(data: &str, output: Option<String>) -> Result<()> {
    if let Some(path) = output {
        let mut f = fs::File::create(&path).context(format!("failed to create {path}"))?;
        writeln!(f, "{data}")?;
        println!("Output written to: {path}");
    } else {
        println!("{data}");
    }
    Ok(())
}

fn exit_on_validation_failure(err: &HelixError) -> ! {
    eprintln!("Error: {err}");
    std::process::exit(1);
}

fn text_to_bits(text: &str) -> String {
    text.bytes().map(|b| format!("{b:08b}")).collect()
}

fn bits_to_text(bits: &str) -> Result<String> {
    let mut bytes = Vec::with_capacity(bits.len() / 8);
    for chunk in bits.as_bytes().chunks(8) {
        if chunk.len() < 8 {
            break;
        }
        let byte_str = std::str::from_utf8(chunk).unwrap();
        bytes.push(u8::from_str_radix(byte_str, 2).context("malformed binary byte")?);
    }
    String::from_utf8(bytes).context("decoded bytes are not valid UTF-8")
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Version => {
            println!("HELIX v1.0.0");
            println!("DNA Storage Encoding/Decoding System");
            println!("Based on: Nguyen et al. - Capacity-Approaching Constrained Codes");
        }

        Commands::Demo { ell, epsilon } => {
            println!("{}", "=".repeat(70));
            println!("HELIX - High-Efficiency Lossless Information eXchange");
            println!("DNA Storage Encoding/Decoding System - DEMO");
            println!("{}", "=".repeat(70));

            let params = codec::Params {
                ell,
                epsilon,
                vt_enabled: true,
                strict: false,
            };

            let test_cases = [
                ("Simple", "11010011"),
                ("Alternating", "10101010"),
                ("All ones", "11111111"),
                ("Mixed", "100100011010"),
            ];

            // Each case is an independent encode/analyze/decode run, so the
            // batch is dispatched across rayon's global pool; printing stays
            // sequential since par_iter().map().collect() preserves order.
            let reports: Vec<(&str, &str, Result<String, HelixError>)> = test_cases
                .par_iter()
                .map(|&(name, bits)| (name, bits, codec::encode(bits, &params)))
                .collect();

            for (name, bits, dna_result) in reports {
                println!("\n{}", "=".repeat(70));
                println!("Test: {name}");
                println!("{}", "=".repeat(70));

                let dna = match dna_result {
                    Ok(dna) => dna,
                    Err(e) => {
                        println!("  Encode: FAILED ({e})");
                        continue;
                    }
                };
                let analyzer = Analyzer::new(ell, epsilon);
                let analysis = analyzer.analyze_dna(&dna);

                println!("\nInput:  {bits} ({} bits)", bits.len());
                println!("Output: {dna} ({} bp)", analysis.length);
                println!("\nConstraint Validation:");
                println!(
                    "  gc_balanced: {}",
                    if analysis.gc_balanced { "PASS" } else { "FAIL" }
                );
                println!(
                    "  runlength_ok: {}",
                    if analysis.runlength_ok {
                        "PASS"
                    } else {
                        "FAIL"
                    }
                );

                println!("\nMetrics:");
                println!("  GC-content: {:.2}%", analysis.gc_content * 100.0);
                println!("  Max runlength: {}", analysis.max_runlength);
                println!(
                    "  Efficiency: {:.2}%",
                    bits.len() as f64 / (dna.len() as f64 * 2.0) * 100.0
                );

                match codec::decode(&dna, &params) {
                    Ok(roundtrip) if roundtrip == bits => println!("  Roundtrip: OK"),
                    Ok(roundtrip) => println!("  Roundtrip: MISMATCH (got {roundtrip})"),
                    Err(e) => println!("  Roundtrip: FAILED ({e})"),
                }
            }

            println!("\n{}", "=".repeat(70));
            println!("Demo completed");
            println!("{}", "=".repeat(70));
        }

        Commands::Analyze {
            input,
            file,
            ell,
            epsilon,
        } => {
            let dna = read_input(input, file, "DNA string")?;
            let analyzer = Analyzer::new(ell, epsilon);
            let analysis = analyzer.analyze_dna(&dna);
            analyzer::print_analysis(&analysis);
        }

        Commands::Encode {
            input,
            file,
            output,
            ell,
            epsilon,
            no_ec,
            verbose,
            analyze,
        } => {
            let bits = read_input(input, file, "binary string")?;
            let params = codec::Params {
                ell,
                epsilon,
                vt_enabled: !no_ec,
                strict: false,
            };

            let dna = match codec::encode(&bits, &params) {
                Ok(dna) => dna,
                Err(e) => exit_on_validation_failure(&e),
            };

            if verbose {
                println!("Input:  {bits} ({} bits)", bits.len());
                println!("Output: {dna} ({} bp)", dna.len());
            }

            if analyze {
                let analyzer = Analyzer::new(ell, epsilon);
                let analysis = analyzer.analyze_dna(&dna);
                analyzer::print_analysis(&analysis);
            }

            if !verbose {
                write_output(&dna, output)?;
            }
        }

        Commands::Decode {
            input,
            file,
            output,
            ell,
            epsilon,
            no_ec,
            verbose,
        } => {
            let dna = read_input(input, file, "DNA string")?;
            let params = codec::Params {
                ell,
                epsilon,
                vt_enabled: !no_ec,
                strict: false,
            };

            let bits = match codec::decode(&dna, &params) {
                Ok(bits) => bits,
                Err(e) => exit_on_validation_failure(&e),
            };

            if verbose {
                println!("Input:  {dna} ({} bp)", dna.len());
                println!("Output: {bits} ({} bits)", bits.len());
            } else {
                write_output(&bits, output)?;
            }
        }

        Commands::TextEncode {
            input,
            file,
            output,
            ell,
            epsilon,
            no_ec,
            verbose,
        } => {
            let text = read_input(input, file, "text")?;
            let bits = text_to_bits(&text);
            let params = codec::Params {
                ell,
                epsilon,
                vt_enabled: !no_ec,
                strict: false,
            };

            let dna = match codec::encode(&bits, &params) {
                Ok(dna) => dna,
                Err(e) => exit_on_validation_failure(&e),
            };

            if verbose {
                println!("Input:  {text} ({} bytes)", text.len());
                println!("Output: {dna} ({} bp)", dna.len());
            } else {
                write_output(&dna, output)?;
            }
        }

        Commands::TextDecode {
            input,
            file,
            output,
            ell,
            epsilon,
            no_ec,
            verbose,
        } => {
            let dna = read_input(input, file, "DNA string")?;
            let params = codec::Params {
                ell,
                epsilon,
                vt_enabled: !no_ec,
                strict: false,
            };

            let bits = match codec::decode(&dna, &params) {
                Ok(bits) => bits,
                Err(e) => exit_on_validation_failure(&e),
            };
            let text = bits_to_text(&bits)?;

            if verbose {
                println!("Input:  {dna} ({} bp)", dna.len());
                println!("Output: {text}");
            } else {
                write_output(&text, output)?;
            }
        }
        Commands::Simulate {
            input,
            file,
            ell,
            epsilon,
        } => {
            let bits = read_input(input, file, "binary string")?;
            let params = codec::Params {
                ell,
                epsilon,
                vt_enabled: true,
                strict: false,
            };

            let dna = match codec::encode(&bits, &params) {
                Ok(dna) => dna,
                Err(e) => exit_on_validation_failure(&e),
            };

            let mut chars: Vec<char> = dna.chars().collect();
            let mut rng = rand::thread_rng();
            let position = rng.gen_range(0..chars.len());
            let original = Nucleotide::from_char(chars[position], position)?;
            let mutated = loop {
                let candidate = [Nucleotide::A, Nucleotide::T, Nucleotide::C, Nucleotide::G]
                    [rng.gen_range(0..4)];
                if candidate != original {
                    break candidate;
                }
            };
            chars[position] = mutated.to_char();
            let corrupted: String = chars.into_iter().collect();

            println!("Original:  {dna}");
            println!("Corrupted: {corrupted}");
            println!(
                "Mutation:  {} -> {} at position {position}",
                original.to_char(),
                mutated.to_char()
            );

            match codec::decode(&corrupted, &params) {
                Ok(roundtrip) if roundtrip == bits => {
                    println!("Detection: UNDETECTED (decoded payload still matches original)");
                }
                Ok(roundtrip) => {
                    println!("Detection: UNDETECTED, but decoded payload diverged: {roundtrip}");
                }
                Err(HelixError::ErrorDetected { kind }) => {
                    println!("Detection: CAUGHT ({kind:?})");
                }
                Err(e) => {
                    println!("Detection: decode failed for an unrelated reason ({e})");
                }
            }
        }
    }

    Ok(())
}
