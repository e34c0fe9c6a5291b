use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, time::Duration};
use stroker_core::{PatternConfig, PatternKind, SpeedLimit};

/// Configuration of a simulated stroking session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Which pattern to run and how it should feel
    #[serde(default)]
    pub pattern: PatternSection,

    /// Stroke geometry and timing
    #[serde(default)]
    pub motion: MotionConfig,

    /// Ceilings enforced by the controller
    #[serde(default)]
    pub machine: MachineConfig,

    /// Simulation limits
    #[serde(default)]
    pub simulation: SimulationConfig,
}

/// Pattern selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternSection {
    /// Pattern slug or display name
    #[serde(default = "default_pattern")]
    pub name: String,

    /// Sensation in `-100..=100`
    #[serde(default)]
    pub sensation: f64,
}

impl Default for PatternSection {
    fn default() -> Self {
        Self {
            name: default_pattern(),
            sensation: 0.0,
        }
    }
}

/// Stroke geometry, in steps and seconds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotionConfig {
    /// Length of a full stroke
    #[serde(default = "default_stroke")]
    pub stroke: i32,

    /// Position of full insertion
    #[serde(default = "default_depth")]
    pub depth: i32,

    /// Seconds for one in-and-out cycle
    #[serde(default = "default_time_of_stroke")]
    pub time_of_stroke: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            stroke: default_stroke(),
            depth: default_depth(),
            time_of_stroke: default_time_of_stroke(),
        }
    }
}

/// Machine ceilings. A ceiling of `0` disables it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineConfig {
    /// Steps per second
    #[serde(default = "default_max_speed")]
    pub max_speed: u32,

    /// Steps per second squared
    #[serde(default = "default_max_acceleration")]
    pub max_acceleration: u32,

    #[serde(default = "default_steps_per_mm")]
    pub steps_per_mm: u32,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            max_speed: default_max_speed(),
            max_acceleration: default_max_acceleration(),
            steps_per_mm: default_steps_per_mm(),
        }
    }
}

/// Simulation limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of moves to issue
    #[serde(default = "default_strokes")]
    pub strokes: u32,

    /// How often the controller re-polls a pattern that is pausing
    #[serde(default = "default_control_interval_ms")]
    pub control_interval_ms: u64,

    /// Abort once simulated time passes this many seconds
    #[serde(default = "default_max_duration_s")]
    pub max_duration_s: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            strokes: default_strokes(),
            control_interval_ms: default_control_interval_ms(),
            max_duration_s: default_max_duration_s(),
        }
    }
}

impl SimulationConfig {
    pub fn control_interval(&self) -> Duration {
        Duration::from_millis(self.control_interval_ms)
    }

    /// Saturates for values [`Config::validate`] rejects.
    pub fn max_duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.max_duration_s).unwrap_or(Duration::MAX)
    }
}

fn default_pattern() -> String {
    PatternKind::SimpleStroke.slug().to_string()
}

fn default_stroke() -> i32 {
    4000
}

fn default_depth() -> i32 {
    5000
}

fn default_time_of_stroke() -> f64 {
    1.0
}

fn default_max_speed() -> u32 {
    30_000
}

fn default_max_acceleration() -> u32 {
    300_000
}

fn default_steps_per_mm() -> u32 {
    40
}

fn default_strokes() -> u32 {
    20
}

fn default_control_interval_ms() -> u64 {
    10
}

fn default_max_duration_s() -> f64 {
    600.0
}

impl Config {
    /// Load configuration from a file, auto-detecting TOML or JSON format
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;

        match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => Self::from_toml(&content),
            Some("json") => Self::from_json(&content),
            // Try TOML first (preferred), fall back to JSON
            _ => Self::from_toml(&content).or_else(|_| Self::from_json(&content)),
        }
    }

    /// Parse configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("failed to parse config as TOML")
    }

    /// Parse configuration from JSON string
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("failed to parse config as JSON")
    }

    /// Reject configurations the pattern generators would turn into
    /// nonsense. The generators themselves never check.
    pub fn validate(&self) -> Result<()> {
        self.pattern_kind()?;

        let sensation = self.pattern.sensation;
        if !(-100.0..=100.0).contains(&sensation) {
            anyhow::bail!("pattern.sensation must be within -100..=100, got {sensation}");
        }

        let motion = &self.motion;
        if !(motion.time_of_stroke.is_finite() && motion.time_of_stroke > 0.0) {
            anyhow::bail!(
                "motion.time_of_stroke must be positive, got {}",
                motion.time_of_stroke
            );
        }
        if motion.stroke <= 0 {
            anyhow::bail!("motion.stroke must be positive, got {}", motion.stroke);
        }
        if motion.stroke > motion.depth {
            anyhow::bail!(
                "motion.stroke ({}) cannot exceed motion.depth ({})",
                motion.stroke,
                motion.depth
            );
        }

        let simulation = &self.simulation;
        if simulation.strokes == 0 {
            anyhow::bail!("simulation.strokes cannot be zero");
        }
        if simulation.control_interval_ms == 0 {
            anyhow::bail!("simulation.control_interval_ms cannot be zero");
        }
        if !(simulation.max_duration_s.is_finite() && simulation.max_duration_s > 0.0) {
            anyhow::bail!(
                "simulation.max_duration_s must be positive, got {}",
                simulation.max_duration_s
            );
        }
        Duration::try_from_secs_f64(simulation.max_duration_s).with_context(|| {
            format!(
                "simulation.max_duration_s is too large, got {}",
                simulation.max_duration_s
            )
        })?;

        Ok(())
    }

    pub fn pattern_kind(&self) -> Result<PatternKind> {
        self.pattern
            .name
            .parse::<PatternKind>()
            .with_context(|| format!("invalid pattern.name {:?}", self.pattern.name))
    }

    /// Generator parameters described by this configuration
    pub fn pattern_config(&self) -> PatternConfig {
        PatternConfig {
            stroke: self.motion.stroke,
            depth: self.motion.depth,
            time_of_stroke: self.motion.time_of_stroke,
            sensation: self.pattern.sensation,
            speed_limit: self.speed_limit(),
        }
    }

    pub fn speed_limit(&self) -> SpeedLimit {
        SpeedLimit {
            max_speed: self.machine.max_speed,
            max_acceleration: self.machine.max_acceleration,
            steps_per_mm: self.machine.steps_per_mm,
        }
    }
}
