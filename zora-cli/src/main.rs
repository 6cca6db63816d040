use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use zora_core::{Animal, Game, GameSecret, MAX_ANIMAL, Region, Secret, symbols};

#[derive(Parser)]
#[command(name = "zora-cli")]
#[command(about = "Oracle game secret (de|en)coder – CLI tool", long_about = None)]
#[command(version)]
struct Cli {
    /// Region of the game the secret is typed into
    #[arg(long, global = true, env = "ZORA_REGION", default_value = "us")]
    region: Region,

    /// More log output on stderr (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a game secret and print its fields
    Decode {
        /// The secret, as glyphs (`H~2:@ ←2♦yq ...`) or with --raw as numbers
        secret: String,

        /// Read the secret as comma or space separated symbol values
        #[arg(long)]
        raw: bool,

        /// Show name bytes with no glyph in the region as `?` instead of failing
        #[arg(long)]
        lossy: bool,
    },

    /// Encode a game secret from its fields
    Encode {
        /// Game id, 0-32767
        #[arg(long)]
        game_id: u16,

        /// Title the secret is entered into
        #[arg(long, default_value = "seasons")]
        game: Game,

        /// Hero name, at most 5 characters
        #[arg(long, default_value = "")]
        hero: String,

        /// Child name, at most 5 characters
        #[arg(long, default_value = "")]
        child: String,

        /// Child behavior value, 0-63
        #[arg(long, default_value_t = 0)]
        behavior: u8,

        /// Companion: ricky, dimitri, moosh or a raw value 0-15
        #[arg(long, default_value = "0", value_parser = parse_animal)]
        animal: u8,

        #[arg(long)]
        hero_quest: bool,

        #[arg(long)]
        linked: bool,

        #[arg(long)]
        free_ring: bool,

        /// Also print the raw symbol values
        #[arg(long)]
        raw: bool,
    },
}

fn parse_animal(s: &str) -> Result<u8, String> {
    if let Ok(animal) = s.parse::<Animal>() {
        return Ok(animal.value());
    }
    match s.parse::<u8>() {
        Ok(value) if value <= MAX_ANIMAL => Ok(value),
        _ => Err(format!(
            "expected ricky, dimitri, moosh or a value 0-{MAX_ANIMAL}, got {s:?}"
        )),
    }
}

fn parse_raw(text: &str) -> Result<Vec<u8>> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<u8>()
                .with_context(|| format!("Invalid symbol value: {part:?}"))
        })
        .collect()
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Decode { secret, raw, lossy } => {
            cmd_decode(&secret, raw, lossy, cli.region)?;
        }
        Commands::Encode {
            game_id,
            game,
            hero,
            child,
            behavior,
            animal,
            hero_quest,
            linked,
            free_ring,
            raw,
        } => {
            let mut secret = GameSecret::new();
            secret.set_region(cli.region);
            secret.set_game_id(game_id)?;
            secret.set_target_game(game);
            secret
                .set_hero(&hero)
                .with_context(|| format!("Invalid hero name: {hero:?}"))?;
            secret
                .set_child(&child)
                .with_context(|| format!("Invalid child name: {child:?}"))?;
            secret.set_behavior(behavior)?;
            secret.set_animal(animal)?;
            secret.set_hero_quest(hero_quest);
            secret.set_linked_game(linked);
            secret.set_given_free_ring(free_ring);

            cmd_encode(&secret, raw)?;
        }
    }

    Ok(())
}

fn cmd_decode(text: &str, raw: bool, lossy: bool, region: Region) -> Result<()> {
    let symbols = if raw {
        parse_raw(text)?
    } else {
        symbols::parse(text).context("Failed to read secret glyphs")?
    };
    debug!(?symbols, %region, "parsed secret");

    let secret = if lossy {
        GameSecret::load_lossy(&symbols, region)
    } else {
        GameSecret::load(&symbols, region)
    }
    .context("Failed to decode game secret")?;
    info!(game_id = secret.game_id(), "decoded game secret");

    let animal = match secret.companion() {
        Some(animal) => format!("{animal} (0x{:02x})", secret.animal()),
        None => format!("0x{:02x}", secret.animal()),
    };

    println!("region:      {}", secret.region());
    println!("game id:     {}", secret.game_id());
    println!("game:        {}", secret.target_game());
    println!("hero:        {}", secret.hero());
    println!("child:       {}", secret.child());
    println!("behavior:    {}", secret.behavior());
    println!("animal:      {}", animal);
    println!("hero quest:  {}", secret.is_hero_quest());
    println!("linked game: {}", secret.is_linked_game());
    println!("free ring:   {}", secret.was_given_free_ring());
    println!(
        "pal:         {}",
        if secret.is_valid_for_pal() { "ok" } else { "invalid" }
    );

    Ok(())
}

fn cmd_encode(secret: &GameSecret, raw: bool) -> Result<()> {
    let bytes = secret.to_bytes().context("Failed to encode game secret")?;
    debug!(?bytes, "encoded game secret");

    println!("{}", symbols::render(&bytes)?);

    if raw {
        let values: Vec<String> = bytes.iter().map(u8::to_string).collect();
        println!("{}", values.join(", "));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_raw() {
        assert_eq!(parse_raw("4, 37 51,,36").unwrap(), vec![4, 37, 51, 36]);
        assert!(parse_raw("4, x").is_err());
        assert!(parse_raw("256").is_err());
    }

    #[test]
    fn test_parse_animal() {
        assert_eq!(parse_animal("Dimitri").unwrap(), 0x0c);
        assert_eq!(parse_animal("7").unwrap(), 7);
        assert!(parse_animal("16").is_err());
        assert!(parse_animal("epona").is_err());
    }

    #[test]
    fn test_args_encode() {
        let cli = Cli::try_parse_from([
            "zora-cli",
            "--region",
            "japan",
            "encode",
            "--game-id",
            "14129",
            "--game",
            "ages",
            "--animal",
            "ricky",
            "--linked",
        ])
        .unwrap();
        assert_eq!(cli.region, Region::Japan);
        match cli.command {
            Commands::Encode {
                game_id,
                game,
                animal,
                linked,
                free_ring,
                ..
            } => {
                assert_eq!(game_id, 14129);
                assert_eq!(game, Game::Ages);
                assert_eq!(animal, 0x0b);
                assert!(linked);
                assert!(!free_ring);
            }
            _ => panic!("expected encode"),
        }
    }

    #[test]
    fn test_args_decode_lossy() {
        let cli = Cli::try_parse_from(["zora-cli", "decode", "--lossy", "B"]).unwrap();
        match cli.command {
            Commands::Decode { lossy, raw, .. } => {
                assert!(lossy);
                assert!(!raw);
            }
            _ => panic!("expected decode"),
        }
    }

    #[test]
    fn test_args_reject_unknown_region() {
        assert!(Cli::try_parse_from(["zora-cli", "--region", "mars", "decode", "B"]).is_err());
    }
}
