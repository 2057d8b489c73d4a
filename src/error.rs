//! Error types for sparkly.
//!
//! Config validation errors are reported synchronously to the constructing
//! caller; the simulation itself never fails mid-step. The remaining types
//! cover the platform glue (sprite loading, GPU initialization, the demo
//! event loop).

use std::fmt;

/// Errors raised when validating an emitter config tree.
///
/// All of these are detected at [`ParticleSystem::new`](crate::ParticleSystem::new)
/// time, before any particle is simulated.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A gradient needs at least 2 stops (the last one is the sentinel boundary).
    TooFewColorStops(usize),
    /// A gradient holds at most 16 stops.
    TooManyColorStops(usize),
    /// Stop ratios are non-negative segment weights.
    NegativeStopRatio(f32),
    /// The segment weights (all stops but the sentinel) must not sum to zero.
    ZeroGradientWeight,
    /// Every scalar config field must be a finite number. An infinite
    /// `spawn_frequency` is a rate the spawn loop could never reach.
    NonFiniteParameter(&'static str, f32),
    /// `max_lifetime` must be positive, or normalized age would divide by zero.
    NonPositiveLifetime(f32),
    /// `spawn_frequency` is a target rate in particles per second.
    NegativeSpawnFrequency(f32),
    /// `burst_interval` is a delay in seconds.
    NegativeBurstInterval(f32),
    /// A particle carries at most 8 emitter slots, one per sub-emission.
    TooManySubEmissions(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::TooFewColorStops(n) => {
                write!(f, "gradient has {} stops, need at least 2 (last stop is the sentinel)", n)
            }
            ConfigError::TooManyColorStops(n) => {
                write!(f, "gradient has {} stops, at most 16 are supported", n)
            }
            ConfigError::NegativeStopRatio(r) => {
                write!(f, "gradient stop ratio {} is negative", r)
            }
            ConfigError::ZeroGradientWeight => {
                write!(f, "gradient segment weights sum to zero, no segment has any width")
            }
            ConfigError::NonFiniteParameter(field, v) => {
                write!(f, "{} is {}, config fields must be finite", field, v)
            }
            ConfigError::NonPositiveLifetime(t) => {
                write!(f, "max_lifetime {} must be greater than zero", t)
            }
            ConfigError::NegativeSpawnFrequency(r) => {
                write!(f, "spawn_frequency {} must not be negative", r)
            }
            ConfigError::NegativeBurstInterval(t) => {
                write!(f, "burst_interval {} must not be negative", t)
            }
            ConfigError::TooManySubEmissions(n) => {
                write!(f, "config has {} sub-emissions, at most 8 emitter slots fit on a particle", n)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors that can occur while loading a sprite image.
#[derive(Debug)]
pub enum TextureError {
    /// Failed to decode image data.
    ImageDecode(image::ImageError),
    /// Failed to read the file from disk.
    Io(std::io::Error),
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::ImageDecode(e) => write!(f, "Failed to decode sprite image: {}", e),
            TextureError::Io(e) => write!(f, "Failed to read sprite file: {}", e),
        }
    }
}

impl std::error::Error for TextureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TextureError::ImageDecode(e) => Some(e),
            TextureError::Io(e) => Some(e),
        }
    }
}

impl From<image::ImageError> for TextureError {
    fn from(e: image::ImageError) -> Self {
        TextureError::ImageDecode(e)
    }
}

impl From<std::io::Error> for TextureError {
    fn from(e: std::io::Error) -> Self {
        TextureError::Io(e)
    }
}

/// Errors that can occur during GPU initialization.
#[derive(Debug)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    NoAdapter,
    /// Failed to create GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            GpuError::NoAdapter => write!(f, "No compatible GPU adapter found. Ensure your system has a GPU with Vulkan/Metal/DX12 support."),
            GpuError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::DeviceCreation(e) => Some(e),
            GpuError::NoAdapter => None,
        }
    }
}

impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}

/// Errors that can occur when running the windowed demo shell.
#[derive(Debug)]
pub enum RunError {
    /// Failed to create event loop.
    EventLoop(winit::error::EventLoopError),
    /// Failed to create window.
    Window(winit::error::OsError),
    /// GPU initialization failed.
    Gpu(GpuError),
    /// The emitter config tree failed validation.
    Config(ConfigError),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::EventLoop(e) => write!(f, "Failed to create event loop: {}", e),
            RunError::Window(e) => write!(f, "Failed to create window: {}", e),
            RunError::Gpu(e) => write!(f, "GPU error: {}", e),
            RunError::Config(e) => write!(f, "Invalid emitter config: {}", e),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RunError::EventLoop(e) => Some(e),
            RunError::Window(e) => Some(e),
            RunError::Gpu(e) => Some(e),
            RunError::Config(e) => Some(e),
        }
    }
}

impl From<winit::error::EventLoopError> for RunError {
    fn from(e: winit::error::EventLoopError) -> Self {
        RunError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for RunError {
    fn from(e: winit::error::OsError) -> Self {
        RunError::Window(e)
    }
}

impl From<GpuError> for RunError {
    fn from(e: GpuError) -> Self {
        RunError::Gpu(e)
    }
}

impl From<ConfigError> for RunError {
    fn from(e: ConfigError) -> Self {
        RunError::Config(e)
    }
}
