//! Training-run compute estimates
//!
//! Uses the `6 · N · D` approximation for forward + backward FLOP, derates
//! peak throughput by model FLOP utilization, and sizes memory, power and
//! energy from the chosen accelerator.

use tracing::trace;

/// Bytes per parameter for mixed-precision weights
const BYTES_PER_PARAM: f64 = 2.0;
/// Weights + gradients + optimizer state + activations, relative to weights
const TRAINING_MEMORY_FACTOR: f64 = 16.0;
/// Facility power / IT power
pub const PUE: f64 = 1.15;

pub const MFU_MIN: u32 = 10;
pub const MFU_MAX: u32 = 70;

/// Accelerator choice
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpuOption {
    pub name: &'static str,
    /// Dense peak in the listed precision
    pub pflops: f64,
    pub memory_gb: f64,
    pub year: u16,
    pub tdp_watts: f64,
}

impl GpuOption {
    /// "H100 (FP16)" -> "H100"
    pub fn short_name(&self) -> &'static str {
        self.name.split(' ').next().unwrap_or(self.name)
    }
}

pub const GPU_OPTIONS: &[GpuOption] = &[
    GpuOption {
        name: "A100 (FP16)",
        pflops: 0.312,
        memory_gb: 80.0,
        year: 2020,
        tdp_watts: 400.0,
    },
    GpuOption {
        name: "H100 (FP16)",
        pflops: 0.990,
        memory_gb: 80.0,
        year: 2022,
        tdp_watts: 700.0,
    },
    GpuOption {
        name: "GB200 (FP8)",
        pflops: 2.25,
        memory_gb: 192.0,
        year: 2024,
        tdp_watts: 1200.0,
    },
];

pub const DEFAULT_GPU: usize = 2;

/// Unit for the training token count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenUnit {
    #[default]
    Trillion,
    Billion,
}

impl TokenUnit {
    pub fn multiplier(&self) -> f64 {
        match self {
            TokenUnit::Trillion => 1e12,
            TokenUnit::Billion => 1e9,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TokenUnit::Trillion => "trillion",
            TokenUnit::Billion => "billion",
        }
    }
}

/// Calculator inputs, kept as typed so partially edited fields survive
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorInputs {
    /// Model parameters, in billions
    pub params: String,
    pub tokens: String,
    pub token_unit: TokenUnit,
    pub gpu_index: usize,
    pub gpu_count: String,
    pub mfu_percent: u32,
}

impl Default for CalculatorInputs {
    fn default() -> Self {
        Self {
            params: "70".to_string(),
            tokens: "2".to_string(),
            token_unit: TokenUnit::Trillion,
            gpu_index: DEFAULT_GPU,
            gpu_count: "1024".to_string(),
            mfu_percent: 40,
        }
    }
}

/// Non-negative number, or 0 when the field does not parse
fn parse_amount(text: &str) -> f64 {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map_or(0.0, |v| v.max(0.0))
}

/// Whole count of at least 1
fn parse_count(text: &str) -> u64 {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 1.0)
        .map_or(1, |v| v.trunc() as u64)
}

impl CalculatorInputs {
    pub fn gpu(&self) -> &'static GpuOption {
        GPU_OPTIONS
            .get(self.gpu_index)
            .unwrap_or(&GPU_OPTIONS[DEFAULT_GPU])
    }

    pub fn estimate(&self) -> TrainingEstimate {
        let gpu = self.gpu();
        let params_b = parse_amount(&self.params);
        let tokens = parse_amount(&self.tokens) * self.token_unit.multiplier();
        let gpus = parse_count(&self.gpu_count);
        let mfu = self.mfu_percent.clamp(MFU_MIN, MFU_MAX) as f64 / 100.0;

        let total_flops = 6.0 * params_b * 1e9 * tokens;
        let flops_per_second = gpu.pflops * mfu * 1e15 * gpus as f64;
        let training_hours = total_flops / flops_per_second / 3600.0;

        let model_memory_gb = params_b * BYTES_PER_PARAM;
        let training_memory_gb = model_memory_gb * TRAINING_MEMORY_FACTOR;
        let min_gpus_for_memory = (training_memory_gb / gpu.memory_gb).ceil() as u64;

        let it_power_mw = gpus as f64 * gpu.tdp_watts / 1e6;
        let energy_mwh = it_power_mw * training_hours;

        trace!(total_flops, training_hours, min_gpus_for_memory, "Training estimate");

        TrainingEstimate {
            gpu,
            params_b,
            gpus,
            total_flops,
            training_hours,
            model_memory_gb,
            training_memory_gb,
            min_gpus_for_memory,
            it_power_mw,
            energy_mwh,
        }
    }
}

/// Derived figures for one set of inputs
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingEstimate {
    pub gpu: &'static GpuOption,
    pub params_b: f64,
    pub gpus: u64,
    pub total_flops: f64,
    pub training_hours: f64,
    pub model_memory_gb: f64,
    pub training_memory_gb: f64,
    pub min_gpus_for_memory: u64,
    pub it_power_mw: f64,
    pub energy_mwh: f64,
}

impl TrainingEstimate {
    pub fn facility_power_mw(&self) -> f64 {
        self.it_power_mw * PUE
    }

    pub fn aggregate_memory_gb(&self) -> f64 {
        self.gpus as f64 * self.gpu.memory_gb
    }

    /// Too few accelerators to hold the training state
    pub fn memory_shortfall(&self) -> bool {
        self.gpus < self.min_gpus_for_memory
    }

    /// Human duration, or an em dash when there is nothing to train
    pub fn training_time_label(&self) -> String {
        if self.training_hours > 0.0 {
            format_duration(self.training_hours)
        } else {
            "\u{2014}".to_string()
        }
    }
}

pub fn format_flops(n: f64) -> String {
    if n >= 1e24 {
        format!("{:.1}e24", n / 1e24)
    } else if n >= 1e21 {
        format!("{:.1} zettaFLOP", n / 1e21)
    } else if n >= 1e18 {
        format!("{:.1} exaFLOP", n / 1e18)
    } else if n >= 1e15 {
        format!("{:.1} petaFLOP", n / 1e15)
    } else if n >= 1e12 {
        format!("{:.1} teraFLOP", n / 1e12)
    } else {
        format!("{:.2e} FLOP", n)
    }
}

pub fn format_duration(hours: f64) -> String {
    if hours < 1.0 {
        format!("{} minutes", (hours * 60.0).round() as i64)
    } else if hours < 24.0 {
        format!("{:.1} hours", hours)
    } else if hours < 24.0 * 7.0 {
        format!("{:.1} days", hours / 24.0)
    } else if hours < 24.0 * 30.0 {
        format!("{:.1} weeks", hours / (24.0 * 7.0))
    } else {
        format!("{:.1} months", hours / (24.0 * 30.0))
    }
}

pub fn format_memory(gb: f64) -> String {
    if gb >= 1000.0 {
        format!("{:.1} TB", gb / 1000.0)
    } else {
        format!("{:.0} GB", gb)
    }
}

pub fn format_energy(mwh: f64) -> String {
    if mwh > 1000.0 {
        format!("{:.1} GWh", mwh / 1000.0)
    } else {
        format!("{:.0} MWh", mwh)
    }
}

pub fn format_power(mw: f64) -> String {
    if mw >= 1.0 {
        format!("{:.1} MW", mw)
    } else {
        format!("{:.0} kW", mw * 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_estimate() {
        let est = CalculatorInputs::default().estimate();
        assert_eq!(est.gpu.short_name(), "GB200");
        assert_eq!(est.gpus, 1024);
        assert!((est.total_flops - 8.4e23).abs() / 8.4e23 < 1e-12);
        assert_eq!(format_flops(est.total_flops), "840.0 zettaFLOP");
        assert_eq!(est.training_time_label(), "1.5 weeks");
        assert_eq!(est.min_gpus_for_memory, 12);
        assert!(!est.memory_shortfall());
        assert!((est.it_power_mw - 1.2288).abs() < 1e-9);
        assert_eq!(format_energy(est.energy_mwh), "311 MWh");
    }

    #[test]
    fn test_memory_shortfall() {
        let inputs = CalculatorInputs {
            gpu_index: 0,
            gpu_count: "8".to_string(),
            ..CalculatorInputs::default()
        };
        let est = inputs.estimate();
        // 70B * 2 bytes * 16 = 2240 GB over 80 GB cards
        assert_eq!(est.min_gpus_for_memory, 28);
        assert!(est.memory_shortfall());
        assert_eq!(format_memory(est.training_memory_gb), "2.2 TB");
        assert_eq!(format_memory(est.aggregate_memory_gb()), "640 GB");
    }

    #[test]
    fn test_unparsable_inputs_fall_back() {
        let inputs = CalculatorInputs {
            params: "abc".to_string(),
            gpu_count: "".to_string(),
            ..CalculatorInputs::default()
        };
        let est = inputs.estimate();
        assert_eq!(est.params_b, 0.0);
        assert_eq!(est.gpus, 1);
        assert_eq!(est.total_flops, 0.0);
        assert_eq!(est.training_time_label(), "\u{2014}");
    }

    #[test]
    fn test_gpu_count_truncates_and_floors_at_one() {
        assert_eq!(parse_count("1024.9"), 1024);
        assert_eq!(parse_count("0"), 1);
        assert_eq!(parse_count("-4"), 1);
        assert_eq!(parse_count(" 16 "), 16);
    }

    #[test]
    fn test_mfu_is_clamped() {
        let low = CalculatorInputs {
            mfu_percent: 0,
            ..CalculatorInputs::default()
        };
        let floor = CalculatorInputs {
            mfu_percent: MFU_MIN,
            ..CalculatorInputs::default()
        };
        assert_eq!(low.estimate().training_hours, floor.estimate().training_hours);
    }

    #[test]
    fn test_token_unit_billion() {
        let inputs = CalculatorInputs {
            tokens: "2000".to_string(),
            token_unit: TokenUnit::Billion,
            ..CalculatorInputs::default()
        };
        let est = inputs.estimate();
        let default = CalculatorInputs::default().estimate();
        assert!((est.total_flops - default.total_flops).abs() / default.total_flops < 1e-12);
    }

    #[test]
    fn test_format_flops_tiers() {
        assert_eq!(format_flops(3.2e24), "3.2e24");
        assert_eq!(format_flops(4.0e18), "4.0 exaFLOP");
        assert_eq!(format_flops(1.5e15), "1.5 petaFLOP");
        assert_eq!(format_flops(2.0e12), "2.0 teraFLOP");
        assert_eq!(format_flops(5.0e9), "5.00e9 FLOP");
    }

    #[test]
    fn test_format_duration_tiers() {
        assert_eq!(format_duration(0.5), "30 minutes");
        assert_eq!(format_duration(5.3), "5.3 hours");
        assert_eq!(format_duration(36.0), "1.5 days");
        assert_eq!(format_duration(24.0 * 14.0), "2.0 weeks");
        assert_eq!(format_duration(24.0 * 90.0), "3.0 months");
    }

    #[test]
    fn test_format_power_and_energy() {
        assert_eq!(format_power(0.32), "320 kW");
        assert_eq!(format_power(1.2288), "1.2 MW");
        assert_eq!(format_energy(2500.0), "2.5 GWh");
        assert_eq!(format_energy(999.4), "999 MWh");
    }

    #[test]
    fn test_gpu_index_out_of_range_uses_default() {
        let inputs = CalculatorInputs {
            gpu_index: 99,
            ..CalculatorInputs::default()
        };
        assert_eq!(inputs.gpu().name, "GB200 (FP8)");
    }
}
