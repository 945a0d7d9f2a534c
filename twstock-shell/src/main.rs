use dotenv::dotenv;
use structopt::StructOpt;
use twstock::metrics::ChartSeries;
use twstock::{CsvPriceSource, PriceSource, StockDesk, DEFAULT_LOOKBACK};
use twstock_shell::{format_analysis, format_recommendations, genai_client, Error};

fn main() -> std::result::Result<(), Error> {
    dotenv().ok();
    env_logger::init();
    let opt = Opt::from_args();
    let source = CsvPriceSource::new(&opt.data_dir);

    match &opt.cmd {
        Command::Analyze { ticker, json } => {
            let client = genai_client(
                opt.api_key.as_deref(),
                opt.model.as_deref(),
                opt.base_url.as_deref(),
            )?;
            let desk = StockDesk::new(client, source);
            if *json {
                let report = desk.report(ticker)?;
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                let sa = desk.analyze(ticker)?;
                println!("{}", format_analysis(&sa));
            }
        }
        Command::Recommend { json } => {
            let client = genai_client(
                opt.api_key.as_deref(),
                opt.model.as_deref(),
                opt.base_url.as_deref(),
            )?;
            let desk = StockDesk::new(client, source);
            let stocks = desk.dashboard();
            if *json {
                println!("{}", serde_json::to_string_pretty(&stocks)?);
            } else {
                println!("{}", format_recommendations(&stocks));
            }
        }
        Command::Chart { ticker, lookback } => {
            let bars = source.daily_bars(ticker, lookback.unwrap_or(DEFAULT_LOOKBACK))?;
            log::info!("annotating {} bars of {}", bars.len(), ticker);
            let chart = ChartSeries::new(&bars);
            println!("{}", serde_json::to_string_pretty(&chart)?);
        }
    }
    Ok(())
}

#[derive(Debug, StructOpt)]
#[structopt(name = "twstock-shell", about = "AI analysis of Taiwan-listed stocks")]
struct Opt {
    #[structopt(long, env = "API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[structopt(long, env = "GENAI_MODEL")]
    model: Option<String>,

    #[structopt(long, env = "GENAI_BASE_URL")]
    base_url: Option<String>,

    #[structopt(short, long, env = "TWSTOCK_DATA_DIR", default_value = "./data")]
    data_dir: String,

    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(Debug, StructOpt)]
enum Command {
    /// Analyze one stock, e.g. 2330
    Analyze {
        ticker: String,
        /// print the analysis and chart data as JSON
        #[structopt(long)]
        json: bool,
    },
    /// List today's recommended stocks
    Recommend {
        #[structopt(long)]
        json: bool,
    },
    /// Print price history annotated with MA5/MA20/MA60
    Chart {
        ticker: String,
        /// number of recent sessions, defaults to the desk lookback
        #[structopt(short, long)]
        lookback: Option<usize>,
    },
}
