//! Board Cafe - Entry Point
//!
//! Sets up logging and the async runtime, bootstraps the engine over the
//! demo data pack, and either autoplays a number of days headlessly or
//! drops into an interactive loop for driving the simulation by hand.

use boardcafe::cafe::tables::TableStatus;
use boardcafe::catalog::demo::{demo_catalog, demo_community, demo_regulars};
use boardcafe::core::config::CafeConfig;
use boardcafe::core::error::Result;
use boardcafe::core::types::TableId;
use boardcafe::model::promotion::PromotionKind;
use boardcafe::providers::{CommunityBoard, RegularsRoster};
use boardcafe::sim::{actions, day, tick, Engine, Prompt, SimEvent};

use clap::Parser;
use std::io::{self, Write};
use tokio::runtime::Runtime;
use tokio::time::MissedTickBehavior;

#[derive(Debug, Parser)]
#[command(name = "boardcafe", about = "Board game cafe management simulation")]
struct Args {
    /// RNG seed; a fixed seed replays the same session tick for tick
    #[arg(long)]
    seed: Option<u64>,

    /// Start in fast-forward
    #[arg(long)]
    fast: bool,

    /// Autoplay this many days headlessly instead of the interactive loop
    #[arg(long)]
    days: Option<u32>,

    /// Print the final engine snapshot as JSON
    #[arg(long)]
    dump: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "boardcafe=info".into()),
        )
        .init();

    let args = Args::parse();

    let mut config = CafeConfig::default();
    if let Some(seed) = args.seed {
        config.rng_seed = seed;
    }

    let mut engine = Engine::bootstrap(
        config,
        demo_catalog(),
        Box::new(RegularsRoster::new(demo_regulars())),
        Box::new(CommunityBoard::new(demo_community())),
    )?;
    if args.fast {
        actions::toggle_speed(&mut engine)?;
    }

    if let Some(days) = args.days {
        let rt = Runtime::new()?;
        rt.block_on(autoplay(&mut engine, days))?;
    } else {
        interactive(&mut engine)?;
    }

    if args.dump {
        println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
    }
    Ok(())
}

/// Drive both cadences on real timers until the target day, auto-declining
/// every prompt so the clock never stalls
async fn autoplay(engine: &mut Engine, days: u32) -> Result<()> {
    let target_day = engine.economy().day + days;
    let mut ticks = tokio::time::interval(engine.clock().tick_interval());
    let mut day_boundaries = tokio::time::interval(engine.clock().day_interval());
    // Skipped intervals are lost, never replayed in a burst
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
    day_boundaries.set_missed_tick_behavior(MissedTickBehavior::Delay);

    while engine.economy().day < target_day {
        tokio::select! {
            _ = ticks.tick() => {
                if let Err(e) = tick::run_tick(engine) {
                    tracing::error!(error = %e, "tick failed");
                }
            }
            _ = day_boundaries.tick() => {
                match day::run_day(engine) {
                    Ok(events) => print_events(&events),
                    Err(e) => tracing::error!(error = %e, "day step failed"),
                }
                auto_decline(engine)?;
            }
        }
    }

    print_status(engine);
    Ok(())
}

fn auto_decline(engine: &mut Engine) -> Result<()> {
    match engine.open_prompt() {
        Some(Prompt::WeeklyOffer { .. }) => {
            actions::weekly_reject(engine)?;
        }
        Some(Prompt::OpportunityNews { .. }) => {
            actions::reject_opportunity(engine)?;
        }
        Some(Prompt::PromotionChoice { .. }) => {
            actions::dismiss_prompt(engine)?;
        }
        None => {}
    }
    Ok(())
}

fn interactive(engine: &mut Engine) -> Result<()> {
    println!("\n=== BOARD CAFE ===");
    println!("Run a board game cafe: seat parties, recommend games, stay solvent.");
    println!();
    print_help();

    loop {
        print_status(engine);
        if let Some(prompt) = engine.open_prompt() {
            print_prompt(prompt);
        }

        print!("> ");
        io::stdout().flush()?;
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim();
        if input.is_empty() {
            continue;
        }
        if input == "quit" || input == "q" {
            break;
        }

        match dispatch(engine, input) {
            Ok(events) => print_events(&events),
            Err(e) => println!("Action failed: {e}"),
        }
    }

    println!(
        "\nClosing time. Day {}, funds {}, {} regulars, {} visitors served.",
        engine.economy().day,
        engine.economy().funds,
        engine.economy().regulars,
        engine.economy().total_visitors
    );
    Ok(())
}

fn dispatch(engine: &mut Engine, input: &str) -> Result<Vec<SimEvent>> {
    match input {
        "tick" | "t" => return tick::run_tick(engine),
        "day" | "d" => return day::run_day(engine),
        "status" | "s" => {
            print_detailed_status(engine);
            return Ok(Vec::new());
        }
        "shop" => {
            for game in engine.purchasable() {
                println!(
                    "  {} (difficulty {}, {} won)",
                    game.name, game.difficulty, game.price
                );
            }
            return Ok(Vec::new());
        }
        "news" => return actions::request_regular_news(engine),
        "accept" => {
            return match engine.open_prompt() {
                Some(Prompt::WeeklyOffer { .. }) => actions::weekly_accept(engine),
                Some(Prompt::OpportunityNews { .. }) => actions::accept_opportunity(engine),
                _ => Ok(Vec::new()),
            }
        }
        "reject" => {
            return match engine.open_prompt() {
                Some(Prompt::WeeklyOffer { .. }) => actions::weekly_reject(engine),
                Some(Prompt::OpportunityNews { .. }) => actions::reject_opportunity(engine),
                _ => actions::dismiss_prompt(engine),
            }
        }
        "table+" => return actions::add_table(engine),
        "speed" => return actions::toggle_speed(engine),
        "help" | "h" => {
            print_help();
            return Ok(Vec::new());
        }
        _ => {}
    }

    if let Some(rest) = input.strip_prefix("run ") {
        let Ok(n) = rest.parse::<u32>() else {
            println!("Usage: run <ticks>");
            return Ok(Vec::new());
        };
        let mut all = Vec::new();
        for _ in 0..n {
            all.extend(tick::run_tick(engine)?);
        }
        return Ok(all);
    }
    if let Some(rest) = input.strip_prefix("select ") {
        let Ok(n) = rest.parse::<u32>() else {
            println!("Usage: select <table number>");
            return Ok(Vec::new());
        };
        return actions::select_table(engine, TableId(n));
    }
    if let Some(name) = input.strip_prefix("buy ") {
        return actions::purchase_game(engine, name);
    }
    if let Some(name) = input.strip_prefix("rec ") {
        return actions::recommend_game(engine, name);
    }
    if let Some(rest) = input.strip_prefix("trade ") {
        // trade <target> : <surrendered>, <surrendered>...
        let Some((target, old)) = rest.split_once(':') else {
            println!("Usage: trade <target> : <surrendered>, ...");
            return Ok(Vec::new());
        };
        let surrendered: Vec<String> = old
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if surrendered.is_empty() {
            println!("Usage: trade <target> : <surrendered>, ...");
            return Ok(Vec::new());
        }
        return actions::trade_games(engine, &surrendered, target.trim());
    }
    if let Some(kind) = input.strip_prefix("promo ") {
        let kind = match kind {
            "sns" => PromotionKind::SnsCampaign,
            "tournament" => PromotionKind::Tournament,
            "discount" => PromotionKind::DiscountDay,
            _ => {
                println!("Usage: promo <sns|tournament|discount>");
                return Ok(Vec::new());
            }
        };
        return actions::run_promotion(engine, kind);
    }

    println!("Unknown command. Type 'help' for the list.");
    Ok(Vec::new())
}

fn print_help() {
    println!("Commands:");
    println!("  tick / t            - Advance one tick");
    println!("  day / d             - Advance one day boundary");
    println!("  run <n>             - Run n ticks");
    println!("  status / s          - Detailed status");
    println!("  shop                - List purchasable games");
    println!("  buy <game>          - Buy a game from the shop");
    println!("  select <table>      - Select/deselect a table (pauses the sim)");
    println!("  rec <game>          - Recommend a game to the selected table");
    println!("  promo <kind>        - Run a promotion on the selected empty table");
    println!("  trade <new> : <old> - Trade owned copies toward a shop game");
    println!("  news                - Ask the regulars for news");
    println!("  accept / reject     - Answer the open prompt");
    println!("  table+              - Buy another table");
    println!("  speed               - Toggle fast-forward");
    println!("  quit / q            - Exit");
    println!();
}

fn print_prompt(prompt: &Prompt) {
    match prompt {
        Prompt::WeeklyOffer {
            name,
            difficulty,
            cost,
        } => println!(
            "! Weekly offer: {name} (difficulty {difficulty}) for {cost} won - accept/reject"
        ),
        Prompt::PromotionChoice { table } => println!(
            "! Table {} selected - promo <sns|tournament|discount> or select {} to cancel",
            table.0, table.0
        ),
        Prompt::OpportunityNews { regular, headline } => {
            println!("! {regular}: {headline} - accept/reject")
        }
    }
}

fn print_events(events: &[SimEvent]) {
    for event in events {
        match serde_json::to_string(event) {
            Ok(json) => println!("  {json}"),
            Err(e) => tracing::warn!(error = %e, "event not serializable"),
        }
    }
}

fn print_status(engine: &Engine) {
    let eco = engine.economy();
    println!();
    println!(
        "--- Day {} | Rating {:.1} | Funds {} | Revenue {} | Regulars {} | Visitors {} | x{} ---",
        eco.day,
        eco.rating(),
        eco.funds,
        eco.revenue,
        eco.regulars,
        eco.total_visitors,
        engine.clock().speed()
    );
    for table in engine.tables() {
        let mood = match table.status() {
            TableStatus::None => "empty",
            TableStatus::Happy => "happy",
            TableStatus::Confused => "confused",
            TableStatus::Unhappy => "unhappy",
        };
        let selected = if engine.selected_table() == Some(table.id) {
            " [selected]"
        } else {
            ""
        };
        match &table.game {
            Some(game) => println!(
                "  Table {}: {} ({}/5) playing {}{}",
                table.id.0,
                mood,
                table.satisfaction(),
                game,
                selected
            ),
            None => println!("  Table {}: {}{}", table.id.0, mood, selected),
        }
    }
    println!();
}

fn print_detailed_status(engine: &Engine) {
    println!();
    println!("=== Library ===");
    for game in engine.owned_unique() {
        println!(
            "  {} {} (difficulty {}, recommended {} times, trade value {})",
            game.icon, game.name, game.difficulty, game.recommend_count, game.trade_value
        );
    }

    println!("=== Tradable copies ===");
    for game in engine.tradable_games() {
        println!("  {} (credit {})", game.name, game.trade_value);
    }

    println!("=== Active buffs ===");
    for buff in engine.active_buffs() {
        println!("  {} [{}] value {}", buff.name, buff.source, buff.value);
    }

    println!("=== Trending this week ===");
    for name in engine.trending() {
        println!("  {name}");
    }

    println!("=== Community board ===");
    for post in engine.community_posts() {
        println!("  {}: {}", post.title, post.content);
    }

    println!("=== Recent reviews ===");
    for review in engine.recent_reviews(5) {
        println!(
            "  Day {}: {:.1} stars ({:?}, {:?})",
            review.day, review.rating, review.sentiment, review.context
        );
    }
    println!();
}
