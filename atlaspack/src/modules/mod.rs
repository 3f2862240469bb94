pub mod clean_sprites;
pub mod extract_sprites;
pub mod pack_sprites;
