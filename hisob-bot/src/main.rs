use std::io::Write as _;
use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Duration, TimeZone, Utc};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use hisob_bot::notify::{ConsoleNotifier, Notifier, WebhookNotifier};
use hisob_bot::router::{Inbound, Router};
use hisob_bot::{config, reply};
use hisob_core::locale::{Lang, replies};
use hisob_core::{classify, format_amount, parse_amount, taxonomy};
use hisob_ledger::export::{DEFAULT_EXPORT_DAYS, export_csv};
use hisob_ledger::memory::MemoryStore;
use hisob_ledger::stats::{period_summary, trailing_summary};
use hisob_ledger::store::Store;
use hisob_ledger::types::{BudgetLimit, Source};

#[derive(Parser)]
#[command(name = "hisob", version, about = "Free-text expense and income ledger")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive chat loop against an in-memory ledger
    Chat {
        /// Numeric user id to act as
        #[arg(long, default_value_t = 1)]
        user: i64,
        /// Reply language (uz, ru, en); defaults to the config value
        #[arg(long)]
        lang: Option<String>,
    },
    /// Show how one message would be parsed and classified
    Parse {
        text: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Command::Chat { user, lang } => chat(user, lang).await,
        Command::Parse { text } => {
            parse_preview(&text.join(" "));
            Ok(())
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn parse_preview(text: &str) {
    match parse_amount(text) {
        Some(amount) => println!("amount:   {amount} ({})", format_amount(amount)),
        None => println!("amount:   none"),
    }
    let category = classify(text);
    println!(
        "category: {} {} ({:?})",
        category.emoji, category.id, category.kind
    );
}

async fn chat(user_id: i64, lang_flag: Option<String>) -> Result<()> {
    let cfg = config::load_config()?;
    let tz = cfg.tz()?;
    let store = Arc::new(MemoryStore::new());
    let notifier: Arc<dyn Notifier> = match &cfg.notify.webhook_url {
        Some(url) => Arc::new(WebhookNotifier::new(url.clone())),
        None => Arc::new(ConsoleNotifier),
    };
    let router = Router::new(store.clone(), notifier, tz);

    let mut lang = lang_flag
        .as_deref()
        .or(Some(cfg.default_lang.as_str()))
        .and_then(Lang::from_code)
        .unwrap_or_default();
    store.create_user(user_id, "you").await?;
    store.set_language(user_id, lang).await?;

    println!("{}", replies(lang).welcome);
    println!(
        "Commands: /pick <category>, /cancel, /balance, /report [days], /limit <category|all> <amount>, /export, /lang <code>, /quit"
    );

    let stdin = std::io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        line.clear();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        if let Some(rest) = input.strip_prefix('/') {
            let mut parts = rest.split_whitespace();
            match parts.next() {
                Some("quit") | Some("q") => break,
                Some("cancel") => println!("{}", router.handle_cancel(user_id).await),
                Some("pick") => match parts.next() {
                    Some(id) => {
                        println!("{}", router.handle_category_pick(user_id, "you", id).await)
                    }
                    None => {
                        for category in taxonomy::all() {
                            println!("  {} {} ({})", category.emoji, category.id, category.name(lang));
                        }
                    }
                },
                Some("balance") => {
                    let balance = store.get_balance(user_id).await?;
                    let now = Utc::now();
                    let today =
                        period_summary(store.as_ref(), user_id, day_start(tz, now), now).await?;
                    println!("{}", reply::balance_report(lang, balance, &today));
                }
                Some("report") => {
                    let days: i64 = parts.next().and_then(|d| d.parse().ok()).unwrap_or(7);
                    let summary =
                        trailing_summary(store.as_ref(), user_id, days, Utc::now()).await?;
                    println!("{}", reply::period_report(lang, days, &summary));
                }
                Some("limit") => match (parts.next(), parts.next().and_then(|a| parse_amount(a))) {
                    (Some(target), Some(monthly_limit)) => {
                        let category_id = match target {
                            "all" => None,
                            id if taxonomy::by_id(id).is_some() => Some(id.to_string()),
                            id => {
                                println!("unknown category: {id}");
                                continue;
                            }
                        };
                        store
                            .set_budget_limit(BudgetLimit {
                                user_id,
                                category_id,
                                monthly_limit,
                                enabled: true,
                            })
                            .await;
                        println!("limit set: {}", format_amount(monthly_limit));
                    }
                    _ => println!("usage: /limit <category|all> <amount>"),
                },
                Some("export") => {
                    let csv =
                        export_csv(store.as_ref(), user_id, lang, DEFAULT_EXPORT_DAYS, Utc::now())
                            .await?;
                    println!("{}", replies(lang).export_caption);
                    print!("{csv}");
                }
                Some("lang") => match parts.next().and_then(Lang::from_code) {
                    Some(code) => {
                        store.set_language(user_id, code).await?;
                        lang = code;
                        println!("{}", replies(lang).welcome);
                    }
                    None => println!("usage: /lang <uz|ru|en>"),
                },
                Some(other) => println!("unknown command: /{other}"),
                None => {}
            }
            continue;
        }

        let answer = router
            .handle_message(&Inbound {
                user_id,
                name: "you".to_string(),
                text: input.to_string(),
                source: Source::Text,
            })
            .await;
        println!("{answer}");
    }
    Ok(())
}

/// First instant of `now`'s local calendar day, as UTC.
fn day_start(tz: Tz, now: DateTime<Utc>) -> DateTime<Utc> {
    let midnight = now.with_timezone(&tz).date_naive().and_hms_opt(0, 0, 0);
    match midnight.and_then(|m| tz.from_local_datetime(&m).earliest()) {
        Some(start) => start.with_timezone(&Utc),
        None => now - Duration::days(1),
    }
}
