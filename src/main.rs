//! Swarm KC entry point
//!
//! The interactive client is hosted by a platform layer that supplies the
//! simulation, renderer and device sampling. Run natively, this binary
//! validates the content catalog and reports the stage size the window
//! would open at.

use std::path::Path;
use std::process::ExitCode;

use swarm_kc::ClientSettings;
use swarm_kc::session::{ConfigSource, FileConfigSource, PresentationConfig};

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Swarm KC (native) starting...");

    let settings = ClientSettings::load(Path::new(ClientSettings::FILE_NAME));
    match check_content(&settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn check_content(settings: &ClientSettings) -> swarm_kc::Result<()> {
    let root = settings.content_root.as_path();
    let source = FileConfigSource::new();

    let manifest = source.load_manifest(root)?;
    let done = manifest.entries.iter().filter(|e| e.completed).count();
    log::info!(
        "Catalog: {} entries, {} completed, active {:?}",
        manifest.len(),
        done,
        manifest.active_index
    );
    for index in 0..manifest.len() {
        manifest.entry(index)?;
    }

    let config_json = source.load_config_json(root)?;
    if config_json.trim().is_empty() {
        return Err(swarm_kc::SessionError::ConfigMissing);
    }
    let mut presentation = PresentationConfig::default();
    presentation.apply_json(&config_json)?;
    log::info!(
        "Window {}x{} (fullscreen: {}), border {}, move speed {}",
        presentation.stage_width(),
        presentation.stage_height(),
        settings.fullscreen,
        presentation.border_size(),
        presentation.move_speed()
    );
    Ok(())
}
