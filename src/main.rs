mod app;
mod logging;
mod render;
mod settings;

use std::path::PathBuf;

use app::{App, AppError};
use clabirint::{MazeConfig, Session};
use clap::Parser;
use rand::{thread_rng, Rng as _};
use settings::Settings;

#[derive(Parser, Debug)]
#[clap(version, about, name = "labirint")]
struct Args {
    #[clap(long, help = "Side length of the maze, odd and at least 3")]
    size: Option<usize>,
    #[clap(short, long, help = "Number of exits carved into the border")]
    exits: Option<usize>,
    #[clap(long, help = "Delay between search steps in milliseconds")]
    delay: Option<u64>,
    #[clap(long, help = "Seed for a reproducible maze")]
    seed: Option<u64>,
    #[clap(short, long, help = "Use this settings file instead of the default one")]
    config: Option<PathBuf>,
    #[clap(long, action, help = "Show config path and quit")]
    show_config_path: bool,
    #[clap(short, long, action, help = "Reset config to default and quit")]
    reset_config: bool,
    #[clap(long, action, help = "Print a maze as text and quit")]
    dump: bool,
    #[clap(long, action, requires = "dump", help = "Run the search before printing")]
    solve: bool,
}

impl Args {
    fn apply(&self, config: MazeConfig) -> MazeConfig {
        let MazeConfig {
            size,
            exits,
            delay_ms,
            seed,
        } = config;
        MazeConfig::new()
            .size(self.size.unwrap_or(size))
            .exits(self.exits.unwrap_or(exits))
            .delay_ms(self.delay.unwrap_or(delay_ms))
            .seed(self.seed.or(seed))
    }
}

fn dump(mut config: MazeConfig, solve: bool) -> Result<(), AppError> {
    if config.seed.is_none() {
        let seed = thread_rng().gen();
        println!("Seed: {}", seed);
        config.seed = Some(seed);
    }

    let mut session = Session::new(config)?;
    if solve {
        session.start_search();
        session.run_to_end();
    }

    print!("{}", render::to_text(&session));
    if solve {
        println!("{}", session.status());
    }

    Ok(())
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();
    let settings_path = args.config.clone().unwrap_or_else(Settings::default_path);

    if args.show_config_path {
        if let Some(s) = settings_path.to_str() {
            println!("{}", s);
        } else {
            println!("{:?}", settings_path);
        }
        return Ok(());
    }

    if args.reset_config {
        Settings::reset_config(&settings_path)?;
        return Ok(());
    }

    let settings = Settings::load(&settings_path)?;
    let config = args.apply(settings.maze_config());
    config.validate()?;

    if args.dump {
        return dump(config, args.solve);
    }

    better_panic::install();
    logging::init();

    let session = Session::new(config)?;
    App::new(session, settings.get_color_scheme()).run()
}
