use clap::{Parser, Subcommand};
use zodiac::layout::{Frames, Layout, Point, project};
use zodiac::lookup;
use zodiac::rings::{RINGS, RingId, segment_index_for};
use zodiac::{Direction, PlanetPosition, Selection, hit_test};

#[derive(Parser, Debug)]
#[command(name = "zodiac", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Direction in which longitude increases on screen
    #[arg(short = 'd', long, default_value_t = Direction::Anticlockwise)]
    direction: Direction,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Show which segment of every ring contains a longitude.
    Locate {
        degree: f64,

        /// Ascendant used for the whole-sign house
        #[arg(short = 'a', long)]
        ascendant: Option<f64>,

        /// Planet whose dignity should be reported at this longitude
        #[arg(short = 'p', long)]
        planet: Option<String>,
    },
    /// Hit-test a point on a rendered diagram.
    Pick {
        x: f64,
        y: f64,

        /// Edge of the square container the diagram is fitted into
        #[arg(short = 's', long, default_value_t = 800.0)]
        size: f64,

        #[arg(short = 'a', long, default_value_t = 0.0)]
        ascendant: f64,

        /// Planet to place on the diagram, as NAME=DEGREE
        #[arg(short = 'p', long = "planet", value_parser = parse_planet)]
        planets: Vec<PlanetPosition>,
    },
}

fn parse_planet(arg: &str) -> Result<PlanetPosition, String> {
    let (name, degree) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=DEGREE, got '{arg}'"))?;
    let degree: f64 = degree
        .trim()
        .parse()
        .map_err(|e| format!("bad degree in '{arg}': {e}"))?;
    Ok(PlanetPosition::new(name.trim(), degree))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Locate {
            degree,
            ascendant,
            planet,
        } => locate(degree, ascendant, planet.as_deref()),
        Commands::Pick {
            x,
            y,
            size,
            ascendant,
            planets,
        } => pick(Point::new(x, y), size, ascendant, cli.direction, &planets),
    }
}

fn locate(degree: f64, ascendant: Option<f64>, planet: Option<&str>) -> anyhow::Result<()> {
    for ring in RINGS.iter().filter(|r| r.id.rotates()) {
        let index = segment_index_for(degree, ring);
        println!("{:<8} {:>3}  {}", ring.id, index + 1, ring.label(index));
    }

    let sign = lookup::sign_index(degree);
    println!("sign lord      {}", lookup::sign_lord(sign));
    println!("mansion lord   {}", lookup::mansion_lord_at(degree));

    if let Some(asc) = ascendant {
        let house = lookup::house_number(degree, asc);
        println!("house          {house}");
        if let Some(meaning) = lookup::house_signification(house) {
            println!("               {meaning}");
        }
    }

    if let Some(name) = planet {
        if lookup::Graha::from_name(name).is_none() {
            anyhow::bail!("'{}' is not a known planet", name);
        }
        println!("dignity        {}", lookup::dignity(name, degree));
        println!("lord relation  {}", lookup::relation_to_lord(name, degree));
    }
    Ok(())
}

fn pick(
    pointer: Point,
    size: f64,
    ascendant: f64,
    direction: Direction,
    planets: &[PlanetPosition],
) -> anyhow::Result<()> {
    let layout = Layout::fit(size, size)
        .ok_or_else(|| anyhow::anyhow!("container size must be positive, got {}", size))?;
    let snapshot = project(layout, Frames::new(ascendant, direction), planets);

    let selection = hit_test(&snapshot, pointer);
    log::debug!("pick ({}, {}) -> {:?}", pointer.x, pointer.y, selection);
    println!("{selection}");

    if let Selection::RingSegment {
        ring: RingId::House,
        index,
    } = selection
        && let Some(meaning) = lookup::house_signification(index + 1)
    {
        println!("{meaning}");
    }
    Ok(())
}
