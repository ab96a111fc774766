pub mod final_scene;
pub mod game_common;
pub mod quiz_scene;
pub mod splash_scene;
