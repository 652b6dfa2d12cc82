//! Machine configuration loading
//!
//! build.rs parses and validates machine.toml, then embeds it as a postcard
//! blob. The blob is decoded once at startup; anything unreadable falls
//! back to the compiled-in defaults.

use defmt::*;

use cashm_core::config::SorterConfig;

/// Validated machine.toml, serialized by build.rs
static EMBEDDED_CONFIG: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/machine_config.bin"));

/// Decode and re-check the embedded configuration
pub fn load() -> SorterConfig {
    match decode(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Loaded machine configuration (version {})", config.version);
            config
        }
        Err(reason) => {
            error!("Embedded configuration unusable: {}", reason);
            error!("Using built-in defaults");
            SorterConfig::default()
        }
    }
}

fn decode(blob: &[u8]) -> Result<SorterConfig, &'static str> {
    let config: SorterConfig = postcard::from_bytes(blob).map_err(|_| "decode failed")?;

    if let Err(e) = config.validate() {
        warn!("Config validation failed: {:?}", e);
        return Err("validation failed");
    }

    Ok(config)
}
