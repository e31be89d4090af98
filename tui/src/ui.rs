mod layout;
mod markup;
mod palette;
mod widgets;

pub use layout::render;
pub use markup::{markup_to_lines, markup_to_plain};
pub use palette::Palette;
pub use widgets::{
    render_header,
    render_notes,
    render_status_bar,
    render_note_form,
    render_delete_confirmation,
    render_export_prompt,
    render_help_screen,
};
