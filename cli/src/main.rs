use clap::{Args, Parser, Subcommand};
use client::DrawingSocket;
use easel::config::Tool;
use easel::engine::DrawingEngine;
use easel::surface::MemorySurface;
use events::{DrawingEvent, EventKind, Point};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("health check failed: HTTP {0}")]
    Unhealthy(u16),
    #[error("websocket session failed: {0}")]
    Session(#[from] client::SessionError),
    #[error("relay rejected event send")]
    SendFailed,
}

#[derive(Parser, Debug)]
#[command(name = "sketchwire-cli", about = "Sketchwire drawing relay CLI")]
struct Cli {
    #[arg(long, env = "SKETCHWIRE_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Health,
    Watch,
    Stroke(StrokeArgs),
    Shape(ShapeArgs),
}

#[derive(Args, Debug)]
struct StrokeArgs {
    #[arg(long, value_parser = parse_point, default_value = "0,0")]
    origin: Point,

    #[arg(value_parser = parse_point, required = true, help = "Pointer positions after the origin, each as X,Y")]
    points: Vec<Point>,

    #[arg(long, default_value = "#000000")]
    color: String,

    #[arg(long, default_value_t = 2.0)]
    width: f64,
}

#[derive(Args, Debug)]
struct ShapeArgs {
    #[arg(long, value_enum, default_value_t = ShapeArg::Rectangle)]
    shape: ShapeArg,

    #[arg(long, value_parser = parse_point, default_value = "0,0")]
    origin: Point,

    #[arg(value_parser = parse_point, required = true, help = "Pointer positions after the origin, each as X,Y")]
    points: Vec<Point>,

    #[arg(long, default_value = "#000000")]
    color: String,

    #[arg(long, default_value_t = 2.0)]
    width: f64,

    #[arg(long, default_value_t = false)]
    filled: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum ShapeArg {
    Rectangle,
    Circle,
}

impl ShapeArg {
    fn tool(self) -> Tool {
        match self {
            Self::Rectangle => Tool::Rect,
            Self::Circle => Tool::Circle,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Health => run_health(&cli.base_url).await,
        Command::Watch => run_watch(&cli.base_url).await,
        Command::Stroke(args) => run_stroke(&cli.base_url, args).await,
        Command::Shape(args) => run_shape(&cli.base_url, args).await,
    }
}

async fn run_health(base_url: &str) -> Result<(), CliError> {
    let client = reqwest::Client::new();
    let url = format!("{}/healthz", base_url.trim_end_matches('/'));
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CliError::Unhealthy(status.as_u16()));
    }
    println!("ok");
    Ok(())
}

async fn run_watch(base_url: &str) -> Result<(), CliError> {
    let mut socket = connect(base_url).await?;
    let mut engine = DrawingEngine::new(MemorySurface::new());

    eprintln!("watching {base_url} for drawing events");
    while let Some(event) = socket.recv().await {
        engine.apply_remote(&event);
        println!("[{}] {}", engine.surface().ops().len(), describe(&event));
    }
    eprintln!("relay closed the session");
    Ok(())
}

async fn run_stroke(base_url: &str, args: StrokeArgs) -> Result<(), CliError> {
    let mut engine = DrawingEngine::new(MemorySurface::new());
    engine.config_mut().stroke_color = args.color;
    engine.config_mut().line_width = args.width;

    let events = drive_gesture(&mut engine, args.origin, &args.points);
    send_all(base_url, &events).await
}

async fn run_shape(base_url: &str, args: ShapeArgs) -> Result<(), CliError> {
    let mut engine = DrawingEngine::new(MemorySurface::new());
    engine.config_mut().tool = args.shape.tool();
    engine.config_mut().stroke_color = args.color;
    engine.config_mut().line_width = args.width;
    engine.config_mut().filled = args.filled;

    let events = drive_gesture(&mut engine, args.origin, &args.points);
    send_all(base_url, &events).await
}

/// Replay a scripted gesture through a local engine, collecting what it
/// emits along the way.
fn drive_gesture(
    engine: &mut DrawingEngine<MemorySurface>,
    origin: Point,
    points: &[Point],
) -> Vec<DrawingEvent> {
    engine.pointer_down(origin);
    let events = points.iter().filter_map(|p| engine.pointer_move(*p)).collect();
    engine.pointer_up();
    events
}

async fn send_all(base_url: &str, events: &[DrawingEvent]) -> Result<(), CliError> {
    let socket = connect(base_url).await?;
    for event in events {
        if !socket.send(event) {
            return Err(CliError::SendFailed);
        }
    }
    socket.close().await;
    eprintln!("sent {} events", events.len());
    Ok(())
}

async fn connect(base_url: &str) -> Result<DrawingSocket, CliError> {
    let url = client::ws_url(base_url)?;
    Ok(DrawingSocket::connect(&url).await?)
}

fn describe(event: &DrawingEvent) -> String {
    let style = format!("{} w{}", event.stroke_color, event.line_width);
    match event.kind {
        EventKind::FreehandSegment => format!(
            "segment ({:.1},{:.1}) -> ({:.1},{:.1}) {style}",
            event.origin.x, event.origin.y, event.endpoint.x, event.endpoint.y
        ),
        EventKind::ShapePreview => format!(
            "{:?} preview ({:.1},{:.1}) -> ({:.1},{:.1}) {style}{}",
            event.shape_kind,
            event.origin.x,
            event.origin.y,
            event.endpoint.x,
            event.endpoint.y,
            if event.filled { " filled" } else { "" }
        ),
    }
}

fn parse_point(raw: &str) -> Result<Point, String> {
    let (x, y) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected `X,Y`, got `{raw}`"))?;
    let x: f64 = x.trim().parse().map_err(|_| format!("invalid X coordinate `{x}`"))?;
    let y: f64 = y.trim().parse().map_err(|_| format!("invalid Y coordinate `{y}`"))?;
    Ok(Point::new(x, y))
}
