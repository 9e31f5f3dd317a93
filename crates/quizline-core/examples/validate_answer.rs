//! Validate an answer with the stub embedder.
//!
//! `cargo run --example validate_answer -- "candidate" "reference"`

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    use quizline::{AnswerValidator, SentenceEmbedder};

    let mut args = std::env::args().skip(1);
    let candidate = args.next().unwrap_or_else(|| "The Mitochondria!".to_string());
    let reference = args
        .next()
        .unwrap_or_else(|| "the mitochondria".to_string());

    let validator = AnswerValidator::new(SentenceEmbedder::stub()?);
    let result = validator.validate(&candidate, &reference).await?;
    println!("{}", result);
    Ok(())
}
