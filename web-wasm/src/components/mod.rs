pub mod analysis_summary;
pub mod api_key_field;
pub mod footer;
pub mod header;
pub mod image_uploader;
pub mod preview_card;
pub mod shopping_list;
pub mod view_toggle;
