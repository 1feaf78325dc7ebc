// src/cli.rs
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "helix", author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(help_template = "\
{before-help}{name} v{version}
{author-with-newline}{about-with-newline}
{usage-heading}
{usage}

{all-args}{after-help}
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Encode a binary string into a constrained-code DNA sequence
    Encode {
        /// Binary string to encode
        #[arg(short, long, value_name = "BITS")]
        input: Option<String>,

        /// Read the binary string from a file
        #[arg(short, long, value_name = "PATH")]
        file: Option<String>,

        /// Write the DNA sequence to a file instead of stdout
        #[arg(short, long, value_name = "PATH")]
        output: Option<String>,

        /// Maximum homopolymer runlength
        #[arg(long, default_value_t = 3, value_name = "ELL")]
        ell: usize,

        /// GC-content tolerance around 0.5
        #[arg(long, default_value_t = 0.05, value_name = "EPSILON")]
        epsilon: f64,

        /// Disable the VT single-edit detection footer
        #[arg(long)]
        no_ec: bool,

        /// Print diagnostic detail instead of just the sequence
        #[arg(short, long)]
        verbose: bool,

        /// Print a constraint analysis of the produced sequence
        #[arg(short, long)]
        analyze: bool,
    },

    /// Decode a DNA sequence back into its original binary string
    Decode {
        /// DNA string to decode
        #[arg(short, long, value_name = "DNA")]
        input: Option<String>,

        /// Read the DNA string from a file
        #[arg(short, long, value_name = "PATH")]
        file: Option<String>,

        /// Write the binary string to a file instead of stdout
        #[arg(short, long, value_name = "PATH")]
        output: Option<String>,

        /// Maximum homopolymer runlength used during encoding
        #[arg(long, default_value_t = 3, value_name = "ELL")]
        ell: usize,

        /// GC-content tolerance used during encoding
        #[arg(long, default_value_t = 0.05, value_name = "EPSILON")]
        epsilon: f64,

        /// Disable the VT single-edit detection footer
        #[arg(long)]
        no_ec: bool,

        /// Print diagnostic detail instead of just the binary string
        #[arg(short, long)]
        verbose: bool,
    },

    /// Encode UTF-8 text (as 8-bit-per-byte binary) into DNA
    TextEncode {
        /// Text to encode
        #[arg(short, long, value_name = "TEXT")]
        input: Option<String>,

        /// Read the text from a file
        #[arg(short, long, value_name = "PATH")]
        file: Option<String>,

        /// Write the DNA sequence to a file instead of stdout
        #[arg(short, long, value_name = "PATH")]
        output: Option<String>,

        #[arg(long, default_value_t = 3, value_name = "ELL")]
        ell: usize,

        #[arg(long, default_value_t = 0.05, value_name = "EPSILON")]
        epsilon: f64,

        #[arg(long)]
        no_ec: bool,

        #[arg(short, long)]
        verbose: bool,
    },

    /// Decode DNA back into text
    TextDecode {
        /// DNA string to decode
        #[arg(short, long, value_name = "DNA")]
        input: Option<String>,

        /// Read the DNA string from a file
        #[arg(short, long, value_name = "PATH")]
        file: Option<String>,

        /// Write the text to a file instead of stdout
        #[arg(short, long, value_name = "PATH")]
        output: Option<String>,

        #[arg(long, default_value_t = 3, value_name = "ELL")]
        ell: usize,

        #[arg(long, default_value_t = 0.05, value_name = "EPSILON")]
        epsilon: f64,

        #[arg(long)]
        no_ec: bool,

        #[arg(short, long)]
        verbose: bool,
    },

    /// Report constraint metrics for a DNA sequence
    Analyze {
        /// DNA string to analyze
        #[arg(short, long, value_name = "DNA")]
        input: Option<String>,

        /// Read the DNA string from a file
        #[arg(short, long, value_name = "PATH")]
        file: Option<String>,

        #[arg(long, default_value_t = 3, value_name = "ELL")]
        ell: usize,

        #[arg(long, default_value_t = 0.05, value_name = "EPSILON")]
        epsilon: f64,
    },

    /// Run the built-in demonstration over a fixed set of sample payloads
    Demo {
        #[arg(long, default_value_t = 3, value_name = "ELL")]
        ell: usize,

        #[arg(long, default_value_t = 0.05, value_name = "EPSILON")]
        epsilon: f64,
    },

    /// Introduce a random single-nucleotide substitution and report whether
    /// the VT footer detects it
    Simulate {
        /// Binary string to encode before mutating
        #[arg(short, long, value_name = "BITS")]
        input: Option<String>,

        /// Read the binary string from a file
        #[arg(short, long, value_name = "PATH")]
        file: Option<String>,

        #[arg(long, default_value_t = 3, value_name = "ELL")]
        ell: usize,

        #[arg(long, default_value_t = 0.05, value_name = "EPSILON")]
        epsilon: f64,
    },

    /// Print version information
    Version,
}
