//! Rack power density across accelerator generations.

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Generation {
    pub name: &'static str,
    pub gpu: &'static str,
    pub year: u16,
    pub rack_power_kw: f64,
    pub cooling: &'static str,
    pub tdp_watts: u32,
    pub memory_gb: u32,
    pub memory_type: &'static str,
    pub compute_pflops: f64,
    pub compute_unit: &'static str,
    pub coolant_temp: Option<&'static str>,
    pub notes: &'static str,
}

pub const GENERATIONS: &[Generation] = &[
    Generation {
        name: "Ampere",
        gpu: "A100",
        year: 2020,
        rack_power_kw: 6.5,
        cooling: "Air-cooled",
        tdp_watts: 400,
        memory_gb: 80,
        memory_type: "HBM2e",
        compute_pflops: 0.312,
        compute_unit: "FP16",
        coolant_temp: None,
        notes: "Standard air-cooled racks. Conventional data center cooling infrastructure sufficient. 8 GPUs per DGX A100 node.",
    },
    Generation {
        name: "Hopper",
        gpu: "H100",
        year: 2022,
        rack_power_kw: 10.2,
        cooling: "Air or liquid",
        tdp_watts: 700,
        memory_gb: 80,
        memory_type: "HBM3",
        compute_pflops: 0.990,
        compute_unit: "FP16",
        coolant_temp: None,
        notes: "Pushed the limits of air cooling. Many deployments added rear-door heat exchangers. 8 GPUs per DGX H100 node.",
    },
    Generation {
        name: "Blackwell",
        gpu: "GB200",
        year: 2024,
        rack_power_kw: 132.0,
        cooling: "Liquid required",
        tdp_watts: 1200,
        memory_gb: 192,
        memory_type: "HBM3e",
        compute_pflops: 2.25,
        compute_unit: "FP8",
        coolant_temp: Some("40-45\u{00B0}C supply"),
        notes: "Air cooling physically impossible. NVL72 rack: 72 GPUs in a single liquid-cooled cabinet. Full direct liquid cooling (DLC) mandatory.",
    },
    Generation {
        name: "Rubin (projected)",
        gpu: "R100",
        year: 2026,
        rack_power_kw: 165.0,
        cooling: "Liquid required",
        tdp_watts: 1400,
        memory_gb: 288,
        memory_type: "HBM4",
        compute_pflops: 4.5,
        compute_unit: "FP8",
        coolant_temp: Some("35-45\u{00B0}C supply"),
        notes: "Projected specs. Expected to continue rack-scale liquid cooling. HBM4 enables higher memory bandwidth. Power density continues to climb.",
    },
];

const DEFAULT_SELECTED: usize = 2;

/// Growth of one generation relative to the first
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Multipliers {
    pub power: f64,
    pub compute: f64,
}

impl Multipliers {
    /// Power growth per unit of compute growth
    pub fn power_per_compute(&self) -> f64 {
        self.power / self.compute
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerTimeline {
    selected: usize,
}

impl Default for PowerTimeline {
    fn default() -> Self {
        Self {
            selected: DEFAULT_SELECTED,
        }
    }
}

impl PowerTimeline {
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> &'static Generation {
        &GENERATIONS[self.selected]
    }

    /// Ignores indices past the last generation
    pub fn select(&mut self, index: usize) {
        if index < GENERATIONS.len() {
            debug!(index, gpu = GENERATIONS[index].gpu, "Generation selected");
            self.selected = index;
        }
    }

    /// Width of a generation's bar as a fraction of the widest
    pub fn bar_fraction(generation: &Generation) -> f64 {
        let max = GENERATIONS
            .iter()
            .map(|g| g.rack_power_kw)
            .fold(0.0_f64, f64::max);
        if max > 0.0 {
            generation.rack_power_kw / max
        } else {
            0.0
        }
    }

    /// `None` while the baseline generation is selected
    pub fn multipliers(&self) -> Option<Multipliers> {
        if self.selected == 0 {
            return None;
        }
        let base = &GENERATIONS[0];
        let gen = self.selected();
        Some(Multipliers {
            power: gen.rack_power_kw / base.rack_power_kw,
            compute: gen.compute_pflops / base.compute_pflops,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_blackwell() {
        let timeline = PowerTimeline::default();
        assert_eq!(timeline.selected().gpu, "GB200");
        assert_eq!(timeline.selected().coolant_temp, Some("40-45\u{00B0}C supply"));
    }

    #[test]
    fn test_bar_fraction_relative_to_max() {
        assert_eq!(PowerTimeline::bar_fraction(&GENERATIONS[3]), 1.0);
        let a100 = PowerTimeline::bar_fraction(&GENERATIONS[0]);
        assert!((a100 - 6.5 / 165.0).abs() < 1e-12);
    }

    #[test]
    fn test_multipliers_against_first_generation() {
        let mut timeline = PowerTimeline::default();
        let m = timeline.multipliers().expect("blackwell has multipliers");
        assert_eq!(format!("{:.1}", m.power), "20.3");
        assert_eq!(format!("{:.1}", m.compute), "7.2");
        assert_eq!(format!("{:.1}", m.power_per_compute()), "2.8");

        timeline.select(0);
        assert_eq!(timeline.multipliers(), None);
    }

    #[test]
    fn test_select_out_of_range_is_ignored() {
        let mut timeline = PowerTimeline::default();
        timeline.select(1);
        timeline.select(GENERATIONS.len());
        assert_eq!(timeline.selected_index(), 1);
    }

    #[test]
    fn test_generations_are_chronological() {
        assert!(GENERATIONS.windows(2).all(|w| w[0].year < w[1].year));
        assert!(GENERATIONS
            .windows(2)
            .all(|w| w[0].rack_power_kw < w[1].rack_power_kw));
    }
}
