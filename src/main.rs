//! Command-line companion for the field guide widgets
//!
//! Run with: cargo run --features cli --bin guide-cli -- <command>

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

use dc_field_guide::core::clusters::{Category, CategoryFilter, SortField, ViewState, CLUSTERS};
use dc_field_guide::core::flops::{
    format_energy, format_flops, format_memory, format_power, CalculatorInputs, TokenUnit,
};
use dc_field_guide::core::mesh::{Mesh, MeshPainter, RenderStats};
use dc_field_guide::core::GuideConfig;

#[derive(Parser)]
#[command(name = "guide-cli", about = "Query the AI data-center field guide from a terminal")]
struct Cli {
    /// JSON config file (same shape as window.__guide_config)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List clusters after filter, search and sort
    Clusters {
        #[arg(long, value_enum, default_value_t = FilterArg::All)]
        filter: FilterArg,
        /// Case-insensitive substring over name, operator, hardware, location, networking
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, value_enum, default_value_t = SortArg::Name)]
        sort: SortArg,
        /// Sort descending
        #[arg(long)]
        desc: bool,
    },
    /// Estimate a training run
    Flops {
        /// Model parameters, in billions
        #[arg(long, default_value = "70")]
        params: String,
        #[arg(long, default_value = "2")]
        tokens: String,
        #[arg(long, value_enum, default_value_t = UnitArg::T)]
        unit: UnitArg,
        #[arg(long, value_enum, default_value_t = GpuArg::Gb200)]
        gpu: GpuArg,
        #[arg(long, default_value = "1024")]
        gpus: String,
        /// Model FLOP utilization, percent (clamped to 10-70)
        #[arg(long, default_value_t = 40)]
        mfu: u32,
    },
    /// Run the particle mesh headless and report what it drew
    Mesh {
        #[arg(long, default_value_t = 600)]
        ticks: u32,
        #[arg(long, default_value_t = 1280.0)]
        width: f32,
        #[arg(long, default_value_t = 720.0)]
        height: f32,
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FilterArg {
    All,
    Operational,
    Planned,
}

impl From<FilterArg> for CategoryFilter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::All => CategoryFilter::All,
            FilterArg::Operational => CategoryFilter::Only(Category::Operational),
            FilterArg::Planned => CategoryFilter::Only(Category::Planned),
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    Name,
    Operator,
    Location,
    Power,
}

impl From<SortArg> for SortField {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Name => SortField::Name,
            SortArg::Operator => SortField::Operator,
            SortArg::Location => SortField::Location,
            SortArg::Power => SortField::Power,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum UnitArg {
    /// Trillions
    T,
    /// Billions
    B,
}

#[derive(Clone, Copy, ValueEnum)]
enum GpuArg {
    A100,
    H100,
    Gb200,
}

impl GpuArg {
    fn index(self) -> usize {
        match self {
            GpuArg::A100 => 0,
            GpuArg::H100 => 1,
            GpuArg::Gb200 => 2,
        }
    }
}

/// Counts draw calls without rasterizing
#[derive(Default)]
struct CountingPainter {
    last: RenderStats,
}

impl MeshPainter for CountingPainter {
    fn clear(&mut self) {
        self.last = RenderStats::default();
    }

    fn link(&mut self, _from: [f32; 2], _to: [f32; 2], _opacity: f32) {
        self.last.links += 1;
    }

    fn packet(&mut self, _at: [f32; 2]) {
        self.last.packets += 1;
    }

    fn node(&mut self, _at: [f32; 2]) {
        self.last.nodes += 1;
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<GuideConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&text)?)
        }
        None => Ok(GuideConfig::default()),
    }
}

fn run_clusters(filter: FilterArg, search: &str, sort: SortArg, desc: bool) {
    let mut state = ViewState::default()
        .with_filter(filter.into())
        .with_search(search);
    let field = SortField::from(sort);
    if state.sort_field != field {
        state = state.with_sort(field);
    }
    if desc {
        state = state.with_sort(field);
    }

    let rows = state.view(CLUSTERS);
    for c in &rows {
        println!(
            "{:<28} {:<16} {:<11} {:<32} {}",
            c.name,
            c.operator,
            c.category.label(),
            c.location,
            c.power
        );
    }
    println!("Showing {} of {} clusters", rows.len(), CLUSTERS.len());
}

fn run_flops(inputs: &CalculatorInputs) {
    let est = inputs.estimate();
    println!("GPU:                {} x {}", est.gpus, est.gpu.name);
    println!("Total FLOP:         {}", format_flops(est.total_flops));
    println!("Training time:      {}", est.training_time_label());
    println!("Training memory:    {}", format_memory(est.training_memory_gb));
    println!("Min. GPUs (memory): {}", est.min_gpus_for_memory);
    println!("IT power:           {}", format_power(est.it_power_mw));
    println!("Facility power:     {}", format_power(est.facility_power_mw()));
    println!("Energy:             {}", format_energy(est.energy_mwh));
    if est.memory_shortfall() {
        println!(
            "warning: {} GPUs provide {}, training state needs ~{}",
            est.gpus,
            format_memory(est.aggregate_memory_gb()),
            format_memory(est.training_memory_gb)
        );
    }
}

fn run_mesh(config: &GuideConfig, ticks: u32, size: [f32; 2], seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut mesh = Mesh::new(config.mesh.clone());
    if !mesh.initialize(size, &mut rng) {
        info!(width = size[0], height = size[1], "Empty surface, nothing to animate");
        return;
    }

    let mut painter = CountingPainter::default();
    let mut total = RenderStats::default();
    let mut max_links = 0;
    for frame in 0..ticks {
        mesh.tick();
        // 60 frames per simulated second
        let stats = mesh.render(frame as f64 / 60.0, &mut painter);
        total.links += stats.links;
        total.packets += stats.packets;
        total.nodes += stats.nodes;
        max_links = max_links.max(stats.links);
    }
    debug!(?painter.last, "Final frame");

    let in_bounds = mesh
        .points()
        .iter()
        .all(|p| (0.0..=size[0]).contains(&p.x) && (0.0..=size[1]).contains(&p.y));
    let frames = ticks.max(1) as f64;
    println!("Frames:            {}", ticks);
    println!("Nodes:             {}", mesh.points().len());
    println!("Avg links/frame:   {:.1}", total.links as f64 / frames);
    println!("Max links/frame:   {}", max_links);
    println!("Avg packets/frame: {:.1}", total.packets as f64 / frames);
    println!("All in bounds:     {}", in_bounds);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,dc_field_guide=debug"));
    fmt().with_env_filter(filter).with_target(true).init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Clusters {
            filter,
            search,
            sort,
            desc,
        } => run_clusters(filter, &search, sort, desc),
        Commands::Flops {
            params,
            tokens,
            unit,
            gpu,
            gpus,
            mfu,
        } => {
            let inputs = CalculatorInputs {
                params,
                tokens,
                token_unit: match unit {
                    UnitArg::T => TokenUnit::Trillion,
                    UnitArg::B => TokenUnit::Billion,
                },
                gpu_index: gpu.index(),
                gpu_count: gpus,
                mfu_percent: mfu,
            };
            run_flops(&inputs);
        }
        Commands::Mesh {
            ticks,
            width,
            height,
            seed,
        } => run_mesh(&config, ticks, [width, height], seed),
    }
    Ok(())
}
