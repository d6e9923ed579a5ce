use std::time::Duration;

use anyhow::Result;
use glam::Vec3;
use log::info;

use skillforge::{
    EditorConfig, EditorSession, EffectHandle, HeadlessScene, IconHandle, MemoryStore, SkillEdit,
    TemplateHandle, UseOutcome,
};

/// Simulated frame length
const FRAME: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting skill editor session (headless)...");

    let mut session = EditorSession::open(
        EditorConfig::default(),
        MemoryStore::new(),
        HeadlessScene::new(),
    )?;

    // Author a character with two skills
    session.add_character("Mage", Some(TemplateHandle::from_path("prefabs/mage")))?;
    session.add_skill("Fireball")?;
    session.edit_selected_skill(
        SkillEdit::new()
            .cooldown(5.0)
            .damage(20.0)
            .description("Hurls a ball of fire")
            .icon(Some(IconHandle::from_path("icons/fireball")))
            .effect(Some(EffectHandle::from_path("fx/fireball"))),
    )?;
    let fireball = session
        .selected_skill()
        .map(|s| s.id)
        .ok_or_else(|| anyhow::anyhow!("Fireball was not selected after creation"))?;
    session.add_skill("Blink")?;

    // Spawn the preview and fire the skill
    session.set_spawn_position(Vec3::new(0.0, 0.0, 5.0));
    let instance = session.spawn_selected()?;
    if let Some(label) = session.status_label() {
        info!("Scene label: {}", label);
    }

    session.select_skill(fireball)?;
    report(session.test_selected_skill()?);
    report(session.test_selected_skill()?);

    // Run frames until the cooldown is over
    let mut frames = 0u32;
    while !session
        .spawned()
        .executor(instance)
        .map_or(true, |executor| executor.is_ready(fireball))
    {
        session.advance(FRAME);
        frames += 1;
    }
    info!(
        "Fireball ready again after {} frames ({:.2}s simulated)",
        frames,
        frames as f32 * FRAME.as_secs_f32()
    );
    report(session.test_selected_skill()?);

    info!(
        "{} effect(s) spawned, {} still alive",
        session.scene().effects_spawned(),
        session.scene().active_effects().len()
    );

    session.destroy_active();
    session.save_config()?;
    info!("Done");

    Ok(())
}

fn report(outcome: UseOutcome) {
    match outcome {
        UseOutcome::Activated => info!("-> activated"),
        UseOutcome::OnCooldown { remaining } => info!("-> on cooldown, {:.1}s left", remaining),
    }
}
