//! Command Line Interface for the coinboard market dashboard.
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use coinboard_api::{ApiServer, ServerConfig};
use coinboard_chart::{ChartState, DrawCommand, Frame, Viewport};
use coinboard_data::{ClientConfig, Dashboard, MarketDataClient, spawn_polling};
use coinboard_domain::format::{PLACEHOLDER, format_amount, format_money, format_percent};
use coinboard_domain::listing::{ListingQuery, category_view, top_movers};
use coinboard_domain::value_objects::ChangeDirection;
use coinboard_domain::{
    AssetRecord, ChartMode, CurrencyCode, DominanceSlice, ListingCategory, OhlcvPoint, SortField,
    Timeframe,
};
use coinboard_simulation::prelude::*;
use dotenv::dotenv;
use prettytable::{Table, row};
use rust_decimal::Decimal;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "coinboard")]
#[command(about = "Cryptocurrency market dashboard CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the passthrough API server
    Serve {
        /// Address to listen on
        #[arg(long, env = "COINBOARD_BIND_ADDR")]
        bind: Option<SocketAddr>,

        /// Upstream market-data API base URL
        #[arg(long, env = "COINBOARD_UPSTREAM_URL")]
        upstream_url: Option<String>,

        /// Listings requested per upstream call
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show the listing table
    Listings {
        /// Dashboard API base URL
        #[arg(long, env = "COINBOARD_API_URL")]
        api_url: Option<String>,

        /// Quote currency (USD, EUR, CHF, GBP, INR, ...)
        #[arg(short, long, default_value = "USD")]
        currency: CurrencyCode,

        /// Sort column, always descending
        #[arg(short, long, default_value = "market_cap")]
        sort: SortField,

        /// Case-insensitive name or symbol filter
        #[arg(long, default_value = "")]
        search: String,

        /// Curated view: trending, new or most_viewed
        #[arg(long)]
        category: Option<ListingCategory>,

        /// Rows to print
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },
    /// Show the market dominance breakdown
    Dominance {
        /// Dashboard API base URL
        #[arg(long, env = "COINBOARD_API_URL")]
        api_url: Option<String>,
    },
    /// Show the fear and greed index
    Sentiment {
        /// Sentiment endpoint URL
        #[arg(long, env = "COINBOARD_SENTIMENT_URL")]
        url: Option<String>,
    },
    /// Poll listings and print the top movers after every refresh
    Watch {
        /// Dashboard API base URL
        #[arg(long, env = "COINBOARD_API_URL")]
        api_url: Option<String>,

        /// Quote currency
        #[arg(short, long, default_value = "USD")]
        currency: CurrencyCode,

        /// Seconds between refreshes
        #[arg(short, long, default_value_t = 30)]
        interval: u64,

        /// Stop after this many refreshes
        #[arg(long)]
        count: Option<u64>,
    },
    /// Render a synthetic OHLCV chart
    Chart {
        /// 1D, 7D, 1M, 1Y or All
        #[arg(short, long, default_value = "1D")]
        timeframe: Timeframe,

        /// price, marketCap or candlestick
        #[arg(short, long, default_value = "price")]
        mode: ChartMode,

        /// Points in the series
        #[arg(long, default_value_t = DEFAULT_SERIES_LEN)]
        points: usize,

        /// Zoom factor applied around the plot centre
        #[arg(long, default_value_t = 1.0)]
        zoom: f64,

        /// Horizontal pan in pixels
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        pan: f64,

        /// Pointer x-position to hit-test
        #[arg(long)]
        hover: Option<f64>,

        /// Keep ticking the series and re-render this many times
        #[arg(long, default_value_t = 0)]
        live: u32,

        /// Print draw commands as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            bind,
            upstream_url,
            limit,
        } => {
            let mut config = ServerConfig::from_env();
            if let Some(bind) = bind {
                config.bind_addr = bind;
            }
            if let Some(url) = upstream_url {
                config.upstream_base_url = url;
            }
            if let Some(limit) = limit {
                config.listing_limit = limit;
            }
            ApiServer::new(config).run().await?;
        }
        Commands::Listings {
            api_url,
            currency,
            sort,
            search,
            category,
            limit,
        } => {
            let client = MarketDataClient::from_config(&client_config(api_url, None))?;
            let assets = client
                .fetch_category_listings(&currency, category)
                .await
                .context("Unable to load data")?;

            let rows = match category {
                Some(category) => category_view(&assets, category, &currency),
                None => ListingQuery {
                    search,
                    sort,
                    currency: currency.clone(),
                }
                .apply(&assets),
            };
            println!("Listings in {currency} ({} of {})", rows.len().min(limit), assets.len());
            print_listings(rows.into_iter().take(limit), &currency);
        }
        Commands::Dominance { api_url } => {
            let client = MarketDataClient::from_config(&client_config(api_url, None))?;
            let slices = client.fetch_dominance().await.context("Unable to load data")?;
            print_dominance(&slices);
        }
        Commands::Sentiment { url } => {
            let client = MarketDataClient::from_config(&client_config(None, url))?;
            let index = client
                .fetch_sentiment_index()
                .await
                .context("Unable to load data")?;

            println!("Fear & Greed: {} ({})", index.value, index.classification.label());
            if let Some(label) = &index.upstream_label {
                println!("Source label: {label}");
            }
            println!("As of:        {}", index.as_of.format("%Y-%m-%d %H:%M UTC"));
            if let Some(secs) = index.time_until_update {
                println!("Next update:  {}m {}s", secs / 60, secs % 60);
            }
        }
        Commands::Watch {
            api_url,
            currency,
            interval,
            count,
        } => {
            let client = MarketDataClient::from_config(&client_config(api_url, None))?;
            let dashboard = Arc::new(Dashboard::new(Arc::new(client)));
            dashboard.change_currency(currency.clone()).await;

            let every = Duration::from_secs(interval.max(1));
            let handle = spawn_polling(dashboard.clone(), every);
            let mut printed = 0u64;
            loop {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => break,
                    _ = tokio::time::sleep(every) => {}
                }
                let store = dashboard.store().await;
                match (store.assets(), store.error()) {
                    (_, Some(error)) => println!("{error}"),
                    (Some(assets), None) => {
                        let currency = store.selected_currency();
                        println!("Top movers in {currency}");
                        print_listings(top_movers(assets, currency, 5).into_iter(), currency);
                    }
                    (None, None) => println!("Loading..."),
                }
                printed += 1;
                if count.is_some_and(|c| printed >= c) {
                    break;
                }
            }
            handle.stop().await;
        }
        Commands::Chart {
            timeframe,
            mode,
            points,
            zoom,
            pan,
            hover,
            live,
            json,
        } => {
            let mut state = ChartState::new(mode, timeframe, Viewport::default());
            let (x0, x1) = state.viewport().x_range();
            let centre = (x0 + x1) / 2.0;
            state.pinch(centre, zoom);
            state.gesture_end();
            state.pointer_down(centre);
            state.pointer_move(centre + pan);
            state.pointer_up();

            let feed = RealtimeFeed::synthetic(
                timeframe,
                points,
                SyntheticParams::default(),
                DEFAULT_TICK_INTERVAL,
            )?;
            let mut rx = feed.subscribe();
            let mut rendered = 0;
            loop {
                let series = rx.borrow_and_update().clone();
                let frame = state.frame(&series)?;
                print_frame(&state, &series, &frame, hover, json)?;

                if rendered >= live {
                    break;
                }
                rendered += 1;
                info!(tick = rendered, "Waiting for next tick");
                rx.changed().await?;
            }
        }
    }

    Ok(())
}

fn client_config(api_url: Option<String>, sentiment_url: Option<String>) -> ClientConfig {
    let mut config = ClientConfig::from_env();
    if let Some(url) = api_url {
        config = config.with_api_base_url(url);
    }
    if let Some(url) = sentiment_url {
        config = config.with_sentiment_url(url);
    }
    config
}

fn change_cell(value: Option<Decimal>) -> String {
    format!("{} {}", ChangeDirection::of(value).arrow(), format_percent(value))
}

fn print_listings<'a>(rows: impl Iterator<Item = &'a AssetRecord>, currency: &CurrencyCode) {
    let mut table = Table::new();
    table.set_titles(row![
        "#", "Name", "Symbol", "Price", "1h", "24h", "7d", "Market Cap", "Volume (24h)"
    ]);
    for asset in rows {
        let quote = asset.quote_in(currency).cloned().unwrap_or_default();
        table.add_row(row![
            asset.cmc_rank.map_or_else(|| PLACEHOLDER.to_string(), |r| r.to_string()),
            asset.name,
            asset.symbol,
            format_money(quote.price, currency, 2),
            change_cell(quote.percent_change_1h),
            change_cell(quote.percent_change_24h),
            change_cell(quote.percent_change_7d),
            format_money(quote.market_cap, currency, 0),
            format_amount(quote.volume_24h, 0)
        ]);
    }
    table.printstd();
}

fn print_dominance(slices: &[DominanceSlice]) {
    let mut table = Table::new();
    table.set_titles(row!["Asset", "Share"]);
    for slice in slices {
        table.add_row(row![slice.name, format!("{:.2}%", slice.percentage_share)]);
    }
    table.printstd();

    let total = DominanceSlice::total_share(slices);
    if (total - Decimal::ONE_HUNDRED).abs() > Decimal::ONE {
        println!("Note: shares sum to {total:.2}%");
    }
}

fn print_frame(
    state: &ChartState,
    series: &[OhlcvPoint],
    frame: &Frame,
    hover: Option<f64>,
    json: bool,
) -> Result<()> {
    let tooltip = hover.and_then(|x| state.hover(series, frame, x));
    if json {
        let mut commands = frame.commands.clone();
        if let Some(tip) = &tooltip {
            commands.push(tip.guide(state.viewport()));
        }
        println!("{}", serde_json::to_string_pretty(&commands)?);
        return Ok(());
    }

    let transform = state.transform();
    let (lo, hi) = frame.value_domain();
    let count = |pred: fn(&DrawCommand) -> bool| frame.commands.iter().filter(|c| pred(c)).count();
    println!(
        "{} {} | zoom {:.2}x pan {:.1}px | points {}..{} of {}",
        state.mode().label(),
        state.timeframe(),
        transform.k,
        transform.tx,
        frame.visible.start,
        frame.visible.end,
        series.len()
    );
    println!("value axis: [{lo:.2}, {hi:.2}]");
    println!(
        "commands: {} total, {} candles, {} time ticks, {} value ticks",
        frame.commands.len(),
        count(|c| matches!(c, DrawCommand::Body { .. })),
        count(|c| matches!(c, DrawCommand::TimeTick { .. })),
        count(|c| matches!(c, DrawCommand::ValueTick { .. }))
    );
    match tooltip {
        Some(tip) => println!("hover @ {:.1}px\n{}", tip.x, tip.label()),
        None if hover.is_some() => println!("hover outside plot area"),
        None => {}
    }
    Ok(())
}
