//! Runtime configuration for the terminal binary.
//!
//! Values come from `RAYCAST_*` environment variables first, then command-line
//! flags override them.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use crate::core::{Map, RenderConfig};
use crate::types::{DEFAULT_STEP, FRAME_MS, MAX_DEPTH, MIN_STEP};

pub const USAGE: &str = "\
usage: console-raycaster [options]

options:
  --map <path>       map text file ('#' wall, '.' open, 'P' spawn)
  --fov <deg>        field of view in degrees (default 45)
  --depth <cells>    maximum ray depth (default 16)
  --step <cells>     ray march step (default 0.1, minimum 0.001)
  --frame-ms <ms>    target frame interval (default 16)
  --parallel         render columns on the rayon pool
  --size <WxH>       fixed screen size instead of the terminal size
  -h, --help         print this help

environment:
  RAYCAST_MAP_PATH RAYCAST_FOV_DEG RAYCAST_MAX_DEPTH RAYCAST_STEP
  RAYCAST_FRAME_MS RAYCAST_PARALLEL RAYCAST_SIZE RAYCAST_LOG_PATH
";

/// What the binary should do after argument parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Run,
    Help,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub map_path: Option<PathBuf>,
    pub fov_deg: f32,
    pub max_depth: f32,
    pub step: f32,
    pub frame_ms: u32,
    pub parallel: bool,
    /// Fixed screen size; `None` follows the terminal.
    pub size: Option<(u16, u16)>,
    pub log_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            map_path: None,
            fov_deg: 45.0,
            max_depth: MAX_DEPTH,
            step: DEFAULT_STEP,
            frame_ms: FRAME_MS,
            parallel: false,
            size: None,
            log_path: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let mut cfg = Self::default();
        if let Some(v) = var("RAYCAST_MAP_PATH") {
            cfg.map_path = Some(PathBuf::from(v));
        }
        if let Some(v) = var("RAYCAST_FOV_DEG") {
            cfg.fov_deg = parse_number("RAYCAST_FOV_DEG", &v)?;
        }
        if let Some(v) = var("RAYCAST_MAX_DEPTH") {
            cfg.max_depth = parse_number("RAYCAST_MAX_DEPTH", &v)?;
        }
        if let Some(v) = var("RAYCAST_STEP") {
            cfg.step = parse_number("RAYCAST_STEP", &v)?;
        }
        if let Some(v) = var("RAYCAST_FRAME_MS") {
            cfg.frame_ms = v
                .parse()
                .map_err(|_| anyhow!("RAYCAST_FRAME_MS: invalid value: {}", v))?;
        }
        if let Some(v) = var("RAYCAST_PARALLEL") {
            cfg.parallel = parse_flag("RAYCAST_PARALLEL", &v)?;
        }
        if let Some(v) = var("RAYCAST_SIZE") {
            cfg.size = Some(parse_size("RAYCAST_SIZE", &v)?);
        }
        cfg.log_path = var("RAYCAST_LOG_PATH").map(PathBuf::from);

        cfg.validate()?;
        Ok(cfg)
    }

    /// Apply command-line flags (program name already stripped).
    pub fn apply_args(&mut self, args: &[String]) -> Result<Command> {
        let mut i = 0usize;
        while i < args.len() {
            let flag = args[i].as_str();
            let mut value = || {
                i += 1;
                args.get(i)
                    .map(String::as_str)
                    .ok_or_else(|| anyhow!("missing value for {}", flag))
            };
            match flag {
                "-h" | "--help" => return Ok(Command::Help),
                "--map" => self.map_path = Some(PathBuf::from(value()?)),
                "--fov" => self.fov_deg = parse_number("--fov", value()?)?,
                "--depth" => self.max_depth = parse_number("--depth", value()?)?,
                "--step" => self.step = parse_number("--step", value()?)?,
                "--frame-ms" => {
                    let v = value()?;
                    self.frame_ms = v
                        .parse()
                        .map_err(|_| anyhow!("--frame-ms: invalid value: {}", v))?;
                }
                "--parallel" => self.parallel = true,
                "--size" => self.size = Some(parse_size("--size", value()?)?),
                other => return Err(anyhow!("unknown argument: {}", other)),
            }
            i += 1;
        }

        self.validate()?;
        Ok(Command::Run)
    }

    fn validate(&self) -> Result<()> {
        if !(self.fov_deg > 0.0 && self.fov_deg < 180.0) {
            return Err(anyhow!(
                "field of view must be in (0, 180) degrees, got {}",
                self.fov_deg
            ));
        }
        if !(self.max_depth > 0.0 && self.max_depth.is_finite()) {
            return Err(anyhow!("max depth must be positive, got {}", self.max_depth));
        }
        if !(self.step >= MIN_STEP && self.step <= self.max_depth) {
            return Err(anyhow!(
                "step must be in [{}, max depth], got {}",
                MIN_STEP,
                self.step
            ));
        }
        if self.frame_ms == 0 {
            return Err(anyhow!("frame interval must be at least 1 ms"));
        }
        Ok(())
    }

    /// Load the configured map, or the built-in one.
    pub fn load_map(&self) -> Result<Map> {
        let Some(path) = &self.map_path else {
            return Ok(Map::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read map file {}", path.display()))?;
        Map::parse(&text).with_context(|| format!("invalid map file {}", path.display()))
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            fov: self.fov_deg.to_radians(),
            max_depth: self.max_depth,
            step: self.step,
            parallel: self.parallel,
        }
    }
}

fn parse_number(name: &str, v: &str) -> Result<f32> {
    let n: f32 = v
        .parse()
        .map_err(|_| anyhow!("{}: invalid value: {}", name, v))?;
    if !n.is_finite() {
        return Err(anyhow!("{}: value must be finite: {}", name, v));
    }
    Ok(n)
}

fn parse_flag(name: &str, v: &str) -> Result<bool> {
    match v.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(anyhow!("{}: expected a boolean, got {}", name, v)),
    }
}

fn parse_size(name: &str, v: &str) -> Result<(u16, u16)> {
    let (w, h) = v
        .split_once(['x', 'X'])
        .ok_or_else(|| anyhow!("{}: expected WxH, got {}", name, v))?;
    let w: u16 = w
        .trim()
        .parse()
        .map_err(|_| anyhow!("{}: invalid width: {}", name, v))?;
    let h: u16 = h
        .trim()
        .parse()
        .map_err(|_| anyhow!("{}: invalid height: {}", name, v))?;
    if w == 0 || h == 0 {
        return Err(anyhow!("{}: size must be non-zero, got {}", name, v));
    }
    Ok((w, h))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn env(pairs: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|k| vars.get(k).cloned())
    }

    #[test]
    fn defaults_match_renderer_constants() {
        let cfg = env(&[]).unwrap();
        assert_eq!(cfg, AppConfig::default());
        let render = cfg.render_config();
        assert!((render.fov - std::f32::consts::FRAC_PI_4).abs() < 1e-6);
        assert_eq!(render.max_depth, 16.0);
        assert!(!render.parallel);
    }

    #[test]
    fn env_values_are_parsed() {
        let cfg = env(&[
            ("RAYCAST_FOV_DEG", "60"),
            ("RAYCAST_MAX_DEPTH", "20"),
            ("RAYCAST_STEP", "0.05"),
            ("RAYCAST_FRAME_MS", "33"),
            ("RAYCAST_PARALLEL", "true"),
            ("RAYCAST_SIZE", "80x24"),
            ("RAYCAST_LOG_PATH", " /tmp/raycast.log "),
        ])
        .unwrap();
        assert_eq!(cfg.fov_deg, 60.0);
        assert_eq!(cfg.max_depth, 20.0);
        assert_eq!(cfg.step, 0.05);
        assert_eq!(cfg.frame_ms, 33);
        assert!(cfg.parallel);
        assert_eq!(cfg.size, Some((80, 24)));
        assert_eq!(cfg.log_path, Some(PathBuf::from("/tmp/raycast.log")));
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let cfg = env(&[("RAYCAST_FOV_DEG", "  "), ("RAYCAST_LOG_PATH", "")]).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn invalid_env_value_names_the_variable() {
        let err = env(&[("RAYCAST_STEP", "fast")]).unwrap_err();
        assert!(err.to_string().contains("RAYCAST_STEP"));
    }

    #[test]
    fn args_override_env() {
        let mut cfg = env(&[("RAYCAST_FOV_DEG", "60")]).unwrap();
        let cmd = cfg
            .apply_args(&args(&["--fov", "90", "--parallel", "--size", "100X30"]))
            .unwrap();
        assert_eq!(cmd, Command::Run);
        assert_eq!(cfg.fov_deg, 90.0);
        assert!(cfg.parallel);
        assert_eq!(cfg.size, Some((100, 30)));
    }

    #[test]
    fn help_flag_short_circuits() {
        let mut cfg = AppConfig::default();
        assert_eq!(
            cfg.apply_args(&args(&["--help", "--bogus"])).unwrap(),
            Command::Help
        );
    }

    #[test]
    fn missing_and_unknown_args_are_errors() {
        let mut cfg = AppConfig::default();
        let err = cfg.apply_args(&args(&["--depth"])).unwrap_err();
        assert!(err.to_string().contains("--depth"));
        assert!(cfg.apply_args(&args(&["--wat"])).is_err());
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let mut cfg = AppConfig::default();
        assert!(cfg.apply_args(&args(&["--fov", "180"])).is_err());

        let mut cfg = AppConfig::default();
        assert!(cfg.apply_args(&args(&["--step", "0"])).is_err());

        let mut cfg = AppConfig::default();
        let err = cfg.apply_args(&args(&["--step", "1e-10"])).unwrap_err();
        assert!(err.to_string().contains("step"));
        assert!(env(&[("RAYCAST_STEP", "0.0001")]).is_err());

        let mut cfg = AppConfig::default();
        assert!(cfg.apply_args(&args(&["--step", "0.001"])).is_ok());

        let mut cfg = AppConfig::default();
        assert!(cfg.apply_args(&args(&["--size", "0x10"])).is_err());

        let mut cfg = AppConfig::default();
        assert!(cfg.apply_args(&args(&["--frame-ms", "0"])).is_err());
    }

    #[test]
    fn missing_map_file_reports_path() {
        let cfg = AppConfig {
            map_path: Some(PathBuf::from("/definitely/not/here.map")),
            ..AppConfig::default()
        };
        let err = cfg.load_map().unwrap_err();
        assert!(format!("{:#}", err).contains("/definitely/not/here.map"));
    }

    #[test]
    fn default_map_is_used_without_path() {
        let map = AppConfig::default().load_map().unwrap();
        assert_eq!((map.width(), map.height()), (16, 16));
    }
}
