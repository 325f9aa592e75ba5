use clap::Args;
use linkexplain::config::{Config, TermFrequencyDefaults};
use linkexplain::error::ExplainResult;
use linkexplain::records::RecordDeck;
use tracing::{debug, info};

#[derive(Args, Debug, Clone)]
pub struct PrepareArgs {
    #[command(flatten)]
    pub term_frequency: TermFrequencyDefaults,

    /// JSON array of {record_left, record_right} pairs as entered.
    #[arg(long)]
    pub records: String,

    /// Which record pair to prepare (0-based).
    #[arg(long, default_value_t = 0)]
    pub index: usize,
}

pub fn run(args: &PrepareArgs, config: Config) -> ExplainResult<()> {
    config.validate()?;

    info!("📂 Loading record pairs: {}", args.records);
    let mut deck = RecordDeck::load_from_file(&args.records)?;
    let pair = deck.select(args.index)?.prepare(&config.term_frequency)?;
    debug!("{}", deck.position_label());

    println!("{}", pair.to_pretty_json()?);
    Ok(())
}
