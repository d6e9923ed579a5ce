// Engine modules: assets, frame clock, scene host

pub mod assets;
pub mod game_loop;
pub mod scene;
