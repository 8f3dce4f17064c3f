//! `delve`: carves a level, scatters enemies through its rooms, and draws it
//! until the window is closed.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use legion::Resources;
use legion::Schedule;
use legion::World;
use rand::SeedableRng as _;
use rand_chacha::ChaCha8Rng;

use delve::entity::Entity;
use delve::entity::EntityType;
use delve::geo::Point;
use delve::gfx::texel::colors;
use delve::gfx::ConsoleSize;
use delve::gfx::Layer;
use delve::gfx::RootConsole;
use delve::map::FovMap;
use delve::map::GameMap;
use delve::spawn;
use delve::spawn::SpawnConfig;
use delve::timing::FrameTimer;
use delve::timing::SystemTimer;

/// Scatter goblins and ogres through a freshly carved dungeon level.
#[derive(Parser, Debug)]
#[command(name = "delve", version)]
struct Args {
  /// Seed for level generation; random if omitted.
  #[arg(long)]
  seed: Option<u64>,

  /// How many rooms to try to carve.
  #[arg(long, default_value_t = 30)]
  rooms: usize,

  /// Console width, in cells.
  #[arg(long, default_value_t = 80)]
  width: u16,

  /// Console height, in cells.
  #[arg(long, default_value_t = 40)]
  height: u16,

  /// Window title.
  #[arg(long, default_value = "delve")]
  title: String,

  /// Font to request for the console.
  #[arg(long)]
  font: Option<PathBuf>,

  /// Most enemies placed in a single room.
  #[arg(long, default_value_t = spawn::MAX_ENEMIES_PER_ROOM)]
  max_enemies: usize,

  /// How far the player can see.
  #[arg(long, default_value_t = 8)]
  sight: i64,

  /// Start covering the whole terminal.
  #[arg(long)]
  fullscreen: bool,

  /// Draw frame timings and level stats on top of the map.
  #[arg(long)]
  debug: bool,
}

/// The level on screen. `entities` is the only owner of every entity; the
/// player is always first.
struct Level {
  map: GameMap,
  entities: Vec<Entity>,
  fov: FovMap,
  seed: u64,
  sight: i64,
}

struct Layers {
  map: Layer,
  entities: Layer,
  debug: Option<Layer>,
}

#[legion::system]
fn poll_events(#[resource] console: &mut RootConsole) {
  console.poll_events();
}

#[legion::system]
fn update_fov(
  #[resource] level: &mut Level,
  #[resource] timer: &SystemTimer,
) {
  let _t = timer.start("update_fov()");
  let Level {
    map,
    entities,
    fov,
    sight,
    ..
  } = level;
  if let Some(player) = entities.first() {
    fov.reveal_radius(map, player.pos, *sight);
  }
}

#[legion::system]
fn render(
  #[resource] level: &Level,
  #[resource] layers: &mut Layers,
  #[resource] console: &mut RootConsole,
  #[resource] frame_timer: &mut FrameTimer,
  #[resource] timer: &SystemTimer,
) {
  let t = timer.start("render()");

  layers.map.clear();
  layers.map.draw(&level.map, &level.fov);
  layers.entities.clear();
  layers.entities.draw(&level.entities, &level.fov);
  console.blit(&layers.map);
  console.blit(&layers.entities);

  if let Some(debug) = &mut layers.debug {
    let count = |kind: EntityType| {
      level.entities.iter().filter(|e| e.kind == kind).count()
    };
    let fps = frame_timer.measure_fps(Duration::from_millis(500));
    let font = console
      .font_path()
      .map(|p| p.display().to_string())
      .unwrap_or_else(|| "terminal default".to_string());

    let mut lines = vec![
      format!("fps: {:.2}, count: {}", fps, frame_timer.frame_count()),
      format!("seed: {}, rooms: {}", level.seed, level.map.rooms().len()),
      format!(
        "goblins: {}, ogres: {}",
        count(EntityType::Goblin),
        count(EntityType::Ogre)
      ),
      format!("font: {}", font),
      "Timings:".to_string(),
    ];
    for (tag, duration) in timer.measure_all() {
      lines.push(format!(" {}: {:.4}ms", tag, duration.as_secs_f64() * 1000.0));
    }

    debug.clear();
    for (row, line) in lines.iter().enumerate() {
      debug.print(Point::new(0, row as i64), line, colors::RED);
    }
    console.blit(debug);
  }
  t.finish();

  let _t = timer.start("present()");
  console.present();
}

#[legion::system]
fn end_frame(#[resource] frame_timer: &mut FrameTimer) {
  frame_timer.end_frame(60);
}

fn main() -> delve::Result<()> {
  let args = Args::parse();
  let seed = args.seed.unwrap_or_else(rand::random);
  let mut rng = ChaCha8Rng::seed_from_u64(seed);
  let timer = SystemTimer::new();

  let size = ConsoleSize {
    width: args.width,
    height: args.height,
  };
  let mut map = GameMap::new(size.rect());
  let rooms = map.rooms_and_corridors(&mut rng, args.rooms, 5, 12).to_vec();

  // The player gets the first room to themself.
  let start = rooms
    .first()
    .map(|r| r.center())
    .unwrap_or_else(|| map.bounds().center());
  let config = SpawnConfig {
    max_per_room: args.max_enemies,
    ..SpawnConfig::default()
  };
  let enemies = {
    let _t = timer.start("spawn::generate_enemies()");
    let rest = rooms.get(1..).unwrap_or(&[]);
    spawn::generate_enemies_with(rest, &mut rng, &config)?
  };

  let mut entities = Vec::with_capacity(enemies.len() + 1);
  entities.push(Entity::new(start, EntityType::Player));
  entities.extend(enemies);

  let mut console = RootConsole::new(&args.title, size, args.font.as_deref());
  if args.fullscreen {
    console.toggle_fullscreen();
  }

  let debug_size = ConsoleSize {
    width: size.width,
    height: 12,
  };
  let layers = Layers {
    map: Layer::new(size, Point::zero()),
    entities: Layer::new(size, Point::zero()),
    debug: if args.debug {
      Some(Layer::new(debug_size, Point::zero()))
    } else {
      None
    },
  };

  let mut world = World::default();
  let mut resources = Resources::default();
  resources.insert(Level {
    map,
    entities,
    fov: FovMap::new(),
    seed,
    sight: args.sight,
  });
  resources.insert(layers);
  resources.insert(console);
  resources.insert(FrameTimer::new());
  resources.insert(timer);

  let mut schedule = Schedule::builder()
    .add_system(poll_events_system())
    .add_system(update_fov_system())
    .flush()
    .add_system(render_system())
    .add_system(end_frame_system())
    .build();

  loop {
    schedule.execute(&mut world, &mut resources);
    let closed = resources
      .get::<RootConsole>()
      .map_or(true, |c| c.is_window_closed());
    if closed {
      break;
    }
  }

  Ok(())
}
