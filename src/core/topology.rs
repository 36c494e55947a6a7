//! Cluster topology explorer
//!
//! Five zoom levels from a single GPU up to a multi-SuperPOD fabric, each
//! with headline figures, an observability note and a diagram.

use tracing::debug;

use super::scene::{Anchor, Line, Paint, Rect, Scene, Stroke, Text};

pub const GPU_COLOR: Paint = Paint::Rgb(74, 144, 217);
pub const NVLINK_COLOR: Paint = Paint::Rgb(46, 125, 50);
pub const IB_COLOR: Paint = Paint::Rgb(230, 81, 0);
pub const CORE_COLOR: Paint = Paint::Rgb(106, 27, 154);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Level {
    #[default]
    Gpu,
    NvLink,
    Nvl72,
    SuperPod,
    Fabric,
}

/// Static description of one level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelInfo {
    pub label: &'static str,
    pub description: &'static str,
    pub gpu_count: &'static str,
    pub bandwidth: &'static str,
    pub latency: &'static str,
    pub observable: &'static str,
}

const GPU_INFO: LevelInfo = LevelInfo {
    label: "Single GPU",
    description: "The fundamental compute unit. A modern Blackwell B200 GPU has 208 billion transistors, 80 GB of HBM3e memory, and can deliver ~2.25 PFLOPS of FP8 compute.",
    gpu_count: "1",
    bandwidth: "8 TB/s (HBM)",
    latency: "\u{2014}",
    observable: "BMC telemetry, power draw, temperature",
};

const NVLINK_INFO: LevelInfo = LevelInfo {
    label: "NVLink Domain",
    description: "A group of GPUs (typically 8 in a DGX node) connected via NVLink through NVSwitch. Every GPU can communicate with every other GPU at 900 GB/s bidirectional \u{2014} without touching the network fabric.",
    gpu_count: "8",
    bandwidth: "900 GB/s per GPU",
    latency: "~1-2 \u{00B5}s",
    observable: "Not visible to network SmartNICs or external monitors",
};

const NVL72_INFO: LevelInfo = LevelInfo {
    label: "NVL72 Rack",
    description: "A single liquid-cooled rack containing 72 Blackwell GPUs connected via NVLink. The entire rack acts as one large NVLink domain. External connectivity is via InfiniBand NICs \u{2014} this is the boundary where network-based monitoring begins to see traffic.",
    gpu_count: "72",
    bandwidth: "900 GB/s (NVLink) / 400 Gb/s (IB)",
    latency: "~1-5 \u{00B5}s (NVLink) / ~1-5 \u{00B5}s (IB)",
    observable: "IB traffic at NIC boundary. NVLink traffic within rack is invisible externally.",
};

const SUPERPOD_INFO: LevelInfo = LevelInfo {
    label: "SuperPOD",
    description: "Multiple NVL72 racks connected via an InfiniBand fat-tree network. A SuperPOD typically contains 8 racks (576 GPUs). All inter-rack traffic flows over InfiniBand and is observable via SmartNICs and switch telemetry.",
    gpu_count: "~576",
    bandwidth: "400 Gb/s IB per link",
    latency: "~3-10 \u{00B5}s",
    observable: "Full visibility via SmartNICs, switch counters, and TAPs on IB fabric",
};

const FABRIC_INFO: LevelInfo = LevelInfo {
    label: "Full Cluster",
    description: "Multiple SuperPODs connected through a core switch layer. Large training clusters (10,000+ GPUs) use multi-tier fat-tree or Clos topologies. WAN links may connect geographically distributed clusters.",
    gpu_count: "2,000+",
    bandwidth: "400 Gb/s IB per link",
    latency: "~5-50 \u{00B5}s (varies with tier)",
    observable: "Full IB fabric observable. Cross-DC WAN links are additional observation points.",
};

impl Level {
    /// Innermost to outermost
    pub const ORDER: &'static [Level] = &[
        Level::Gpu,
        Level::NvLink,
        Level::Nvl72,
        Level::SuperPod,
        Level::Fabric,
    ];

    pub fn info(&self) -> &'static LevelInfo {
        match self {
            Level::Gpu => &GPU_INFO,
            Level::NvLink => &NVLINK_INFO,
            Level::Nvl72 => &NVL72_INFO,
            Level::SuperPod => &SUPERPOD_INFO,
            Level::Fabric => &FABRIC_INFO,
        }
    }

    pub fn index(&self) -> usize {
        Level::ORDER.iter().position(|l| l == self).unwrap_or(0)
    }

    pub fn diagram(&self) -> Scene {
        match self {
            Level::Gpu => gpu_diagram(),
            Level::NvLink => nvlink_diagram(),
            Level::Nvl72 => nvl72_diagram(),
            Level::SuperPod => superpod_diagram(),
            Level::Fabric => fabric_diagram(),
        }
    }
}

/// Current zoom level, stepping along [`Level::ORDER`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TopologyExplorer {
    level: Level,
}

impl TopologyExplorer {
    pub fn level(&self) -> Level {
        self.level
    }

    pub fn select(&mut self, level: Level) {
        debug!(?level, "Topology level");
        self.level = level;
    }

    pub fn can_zoom_in(&self) -> bool {
        self.level.index() > 0
    }

    pub fn can_zoom_out(&self) -> bool {
        self.level.index() + 1 < Level::ORDER.len()
    }

    /// One level towards the single GPU; no-op at the innermost level.
    pub fn zoom_in(&mut self) {
        if self.can_zoom_in() {
            self.select(Level::ORDER[self.level.index() - 1]);
        }
    }

    /// One level towards the full fabric; no-op at the outermost level.
    pub fn zoom_out(&mut self) {
        if self.can_zoom_out() {
            self.select(Level::ORDER[self.level.index() + 1]);
        }
    }
}

fn gpu_box(scene: &mut Scene, x: f32, y: f32, size: f32, label: String) {
    scene.add(Rect::new(x, y, size, size).rounded(4.0).fill(GPU_COLOR));
    let font = if size > 30.0 { 10.0 } else { 7.0 };
    scene.add(
        Text::new(x + size / 2.0, y + size / 2.0 + font / 2.0, label, font)
            .paint(Paint::White)
            .bold(),
    );
}

fn gpu_diagram() -> Scene {
    let mut s = Scene::new(200.0, 120.0);
    s.add(Rect::new(70.0, 20.0, 60.0, 60.0).rounded(6.0).fill(GPU_COLOR));
    s.add(Text::new(100.0, 52.0, "GPU", 11.0).paint(Paint::White).bold());
    s.add(Text::new(100.0, 68.0, "80 GB HBM3e", 8.0).paint(Paint::White));
    s.add(Text::new(100.0, 100.0, "Single Blackwell GPU (B200)", 10.0));
    s
}

fn nvlink_diagram() -> Scene {
    let mut s = Scene::new(360.0, 160.0);
    s.add(
        Rect::new(10.0, 10.0, 340.0, 100.0)
            .rounded(8.0)
            .stroke(Stroke::dashed(2.0, NVLINK_COLOR, 6.0, 3.0)),
    );
    s.add(
        Text::new(180.0, 30.0, "NVLink Domain (NVSwitch-connected)", 10.0)
            .paint(NVLINK_COLOR)
            .bold(),
    );
    for i in 0..8 {
        gpu_box(&mut s, 25.0 + i as f32 * 40.0, 45.0, 32.0, format!("G{}", i));
    }
    s.add(Line::new([25.0, 85.0], [345.0, 85.0], Stroke::solid(3.0, NVLINK_COLOR)));
    s.add(Text::new(
        180.0,
        130.0,
        "8 GPUs connected via NVLink \u{2014} 900 GB/s per GPU bidirectional",
        9.0,
    ));
    s.add(
        Text::new(180.0, 150.0, "All-to-all communication, no SmartNIC visibility", 8.0)
            .paint(Paint::TextMuted),
    );
    s
}

fn nvl72_diagram() -> Scene {
    let mut s = Scene::new(400.0, 220.0);
    s.add(
        Rect::new(5.0, 5.0, 390.0, 175.0)
            .rounded(8.0)
            .stroke(Stroke::solid(2.0, Paint::Outline)),
    );
    s.add(Text::new(200.0, 25.0, "NVL72 Rack (72 GPUs)", 11.0).bold());
    for row in 0..4 {
        let y = 35.0 + row as f32 * 35.0;
        s.add(
            Rect::new(15.0, y, 370.0, 28.0)
                .rounded(4.0)
                .stroke(Stroke::dashed(1.0, NVLINK_COLOR, 4.0, 2.0)),
        );
        for col in 0..18 {
            let x = 22.0 + col as f32 * 20.0;
            s.add(
                Rect::new(x, y + 4.0, 16.0, 20.0)
                    .rounded(2.0)
                    .fill(GPU_COLOR)
                    .opacity(0.85),
            );
            s.add(Text::new(x + 8.0, y + 17.0, format!("{}", row * 18 + col), 5.0).paint(Paint::White));
        }
    }
    s.add(Text::new(
        200.0,
        195.0,
        "72 GPUs across NVLink domains \u{2014} ~130 kW liquid-cooled rack",
        9.0,
    ));
    s.add(
        Text::new(
            200.0,
            210.0,
            "Intra-rack: NVLink (900 GB/s/GPU). External connectivity: InfiniBand NICs.",
            8.0,
        )
        .paint(Paint::TextMuted),
    );
    s
}

fn superpod_diagram() -> Scene {
    let mut s = Scene::new(440.0, 200.0);
    s.add(Text::new(220.0, 18.0, "SuperPOD (~576 GPUs)", 11.0).bold());
    for i in 0..4 {
        let x = 100.0 + i as f32 * 70.0;
        s.add(Rect::new(x, 30.0, 50.0, 20.0).rounded(3.0).fill(IB_COLOR));
        s.add(Text::new(x + 25.0, 43.0, format!("Spine {}", i), 7.0).paint(Paint::White));
    }
    for i in 0..8 {
        let x = 12.0 + i as f32 * 53.0;
        s.add(
            Rect::new(x, 90.0, 46.0, 70.0)
                .rounded(4.0)
                .stroke(Stroke::solid(1.5, Paint::Outline)),
        );
        s.add(Text::new(x + 23.0, 105.0, "NVL72", 7.0).bold());
        for j in 0..12 {
            s.add(
                Rect::new(
                    x + 4.0 + (j % 4) as f32 * 10.0,
                    112.0 + (j / 4) as f32 * 12.0,
                    8.0,
                    10.0,
                )
                .rounded(1.0)
                .fill(GPU_COLOR)
                .opacity(0.7),
            );
        }
        s.add(Line::new(
            [x + 23.0, 90.0],
            [x + 23.0, 55.0],
            Stroke::solid(1.5, IB_COLOR),
        ));
    }
    s.add(Text::new(
        220.0,
        185.0,
        "8 NVL72 racks connected via InfiniBand fat-tree fabric",
        9.0,
    ));
    s.add(
        Text::new(
            220.0,
            198.0,
            "Inter-rack: 400 Gb/s InfiniBand per link. SmartNICs can observe this traffic.",
            8.0,
        )
        .paint(Paint::TextMuted),
    );
    s
}

fn fabric_diagram() -> Scene {
    let mut s = Scene::new(480.0, 220.0);
    s.add(Text::new(240.0, 18.0, "Full Cluster (multiple SuperPODs)", 11.0).bold());
    s.add(Rect::new(170.0, 30.0, 140.0, 24.0).rounded(4.0).fill(CORE_COLOR));
    s.add(Text::new(240.0, 45.0, "Core / Director Switches", 9.0).paint(Paint::White));
    for i in 0..4 {
        let x = 20.0 + i as f32 * 115.0;
        s.add(
            Rect::new(x, 100.0, 100.0, 80.0)
                .rounded(6.0)
                .stroke(Stroke::solid(2.0, IB_COLOR)),
        );
        s.add(Text::new(x + 50.0, 120.0, format!("SuperPOD {}", i), 9.0).bold());
        s.add(Text::new(x + 50.0, 135.0, "576 GPUs", 7.0).paint(Paint::TextMuted));
        for j in 0..4 {
            s.add(
                Rect::new(x + 10.0 + j as f32 * 20.0, 145.0, 16.0, 24.0)
                    .rounded(2.0)
                    .fill(Paint::Faint),
            );
        }
        s.add(Line::new(
            [x + 50.0, 100.0],
            [x + 50.0, 58.0],
            Stroke::solid(1.5, IB_COLOR),
        ));
    }
    s.add(Text::new(
        240.0,
        205.0,
        "SuperPODs interconnected via core switch layer \u{2014} 2,000+ GPUs",
        9.0,
    ));
    s.add(
        Text::new(
            240.0,
            218.0,
            "East-west traffic observable at spine/core. NVLink traffic remains invisible at every scale.",
            8.0,
        )
        .paint(Paint::TextMuted)
        .anchor(Anchor::Middle),
    );
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level_is_gpu() {
        let explorer = TopologyExplorer::default();
        assert_eq!(explorer.level(), Level::Gpu);
        assert!(!explorer.can_zoom_in());
        assert!(explorer.can_zoom_out());
    }

    #[test]
    fn test_zoom_walks_order_and_saturates() {
        let mut explorer = TopologyExplorer::default();
        for expected in &Level::ORDER[1..] {
            explorer.zoom_out();
            assert_eq!(explorer.level(), *expected);
        }
        assert!(!explorer.can_zoom_out());
        explorer.zoom_out();
        assert_eq!(explorer.level(), Level::Fabric);

        explorer.zoom_in();
        assert_eq!(explorer.level(), Level::SuperPod);
    }

    #[test]
    fn test_zoom_in_at_gpu_is_noop() {
        let mut explorer = TopologyExplorer::default();
        explorer.zoom_in();
        assert_eq!(explorer.level(), Level::Gpu);
    }

    #[test]
    fn test_select_jumps_directly() {
        let mut explorer = TopologyExplorer::default();
        explorer.select(Level::Nvl72);
        assert_eq!(explorer.level().index(), 2);
        assert!(explorer.can_zoom_in() && explorer.can_zoom_out());
    }

    #[test]
    fn test_level_figures() {
        assert_eq!(Level::Nvl72.info().gpu_count, "72");
        assert_eq!(Level::SuperPod.info().label, "SuperPOD");
        assert_eq!(Level::Gpu.info().latency, "\u{2014}");
    }

    #[test]
    fn test_diagram_gpu_counts() {
        assert_eq!(Level::Gpu.diagram().count_filled(GPU_COLOR), 1);
        assert_eq!(Level::NvLink.diagram().count_filled(GPU_COLOR), 8);
        assert_eq!(Level::Nvl72.diagram().count_filled(GPU_COLOR), 72);
        // 8 racks x 12 mini GPUs
        assert_eq!(Level::SuperPod.diagram().count_filled(GPU_COLOR), 96);
        assert_eq!(Level::Fabric.diagram().count_filled(Paint::Faint), 16);
    }

    #[test]
    fn test_nvl72_labels_cover_all_gpus() {
        let scene = Level::Nvl72.diagram();
        for n in [0, 17, 18, 71] {
            assert!(scene.texts().any(|t| t.text == n.to_string()));
        }
    }
}
