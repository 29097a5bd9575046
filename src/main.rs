use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};

use stranded_runtime::{
    ClockDriver, Dispatcher, EntityClass, HostSignal, MapDefinition, NullAudio, NullHud,
    NullRender, ScriptHost, Session,
};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = CliOptions::parse()?;
    let xml = fs::read_to_string(&options.map)
        .with_context(|| format!("failed to open map {}", options.map))?;
    let map = MapDefinition::from_xml(&xml).context("failed to parse map XML")?;

    let session = Session::new();
    map.populate(&session);
    // No external asset loader in headless mode; the world is ready as
    // soon as the store is populated.
    session.mark_ready();
    session.enter_game();

    println!(
        "Loaded map with {} entities ({} units)",
        session.entities().total(),
        session.entities().count(EntityClass::Unit)
    );
    for class in [
        EntityClass::Object,
        EntityClass::Unit,
        EntityClass::Item,
        EntityClass::Info,
    ] {
        for entity in session.entities().all(class) {
            println!(" - {} #{} (type {})", class, entity.id, entity.entity_type);
        }
    }

    let signal = Arc::new(ShellSignal::default());
    let dispatcher = Arc::new(Dispatcher::new(
        session.clone(),
        Arc::new(NullRender),
        Arc::new(NullAudio),
        Arc::new(NullHud),
        Arc::clone(&signal) as Arc<dyn HostSignal>,
    ));

    let driver = (options.clock_seconds > 0)
        .then(|| ClockDriver::start(session.clock().clone(), ClockDriver::DEFAULT_INTERVAL));

    if !options.scripts.is_empty() {
        println!("Starting scripts...");
        let mut host = ScriptHost::new(Arc::clone(&dispatcher));
        let count = host
            .run_files(&options.scripts)
            .context("failed to launch scripts")?;
        println!("Launched {count} script(s)");
        host.wait().context("script execution failed")?;
    }

    if let Some(mut driver) = driver {
        thread::sleep(Duration::from_secs(options.clock_seconds));
        driver.stop();
    }

    if signal.quit_requested() {
        session.return_to_main();
        println!("Quit requested; returning to main menu");
    }

    print_final_state(&session);
    Ok(())
}

fn print_final_state(session: &Session) {
    let vitals = session.player().vitals();
    let env = session.environment();
    println!("Final world state:");
    println!(
        " - day {} time {} climate {:?} weather {:?}",
        session.clock().day(),
        session.clock().formatted_time(),
        env.climate(),
        env.weather()
    );
    println!(
        " - entities: {} objects, {} units, {} items, {} infos",
        session.entities().count(EntityClass::Object),
        session.entities().count(EntityClass::Unit),
        session.entities().count(EntityClass::Item),
        session.entities().count(EntityClass::Info)
    );
    println!(
        " - player: energy {:.1} hunger {:.1} thirst {:.1} exhaustion {:.1}",
        vitals.energy, vitals.hunger, vitals.thirst, vitals.exhaustion
    );
    for item in session.player().items() {
        println!("   item #{} x{}", item.item_type, item.amount);
    }
    println!(" - menu: {:?}", session.menu());
}

/// Quit latch consumed by the shell after scripts finish.
#[derive(Debug, Default)]
struct ShellSignal {
    quit: AtomicBool,
}

impl ShellSignal {
    fn quit_requested(&self) -> bool {
        self.quit.load(Ordering::Acquire)
    }
}

impl HostSignal for ShellSignal {
    fn quit(&self) {
        self.quit.store(true, Ordering::Release);
    }
}

struct CliOptions {
    map: String,
    scripts: Vec<PathBuf>,
    clock_seconds: u64,
}

impl CliOptions {
    fn parse() -> Result<Self> {
        let mut args = env::args().skip(1);
        let Some(map) = args.next() else {
            return Err(anyhow!(
                "Usage: stranded-runtime <map.xml> [--script <file.lua>]... [--clock-seconds <n>]"
            ));
        };
        let mut scripts = Vec::new();
        let mut clock_seconds = 0;
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--script" => {
                    let Some(path) = args.next() else {
                        return Err(anyhow!("--script expects a file path"));
                    };
                    scripts.push(PathBuf::from(path));
                }
                "--clock-seconds" => {
                    let Some(value) = args.next() else {
                        return Err(anyhow!("--clock-seconds expects a number"));
                    };
                    clock_seconds = value
                        .parse::<u64>()
                        .with_context(|| format!("invalid --clock-seconds value: {value}"))?;
                }
                other => {
                    return Err(anyhow!(
                        "Unknown argument: {other}. Expected --script or --clock-seconds"
                    ));
                }
            }
        }
        Ok(Self {
            map,
            scripts,
            clock_seconds,
        })
    }
}
