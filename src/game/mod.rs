// Game-side data and behavior: the roster, skills, and the authoring session

pub mod characters;
pub mod config;
pub mod editor;
pub mod skills;
pub mod storage;
