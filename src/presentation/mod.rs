pub mod html;
pub mod markup;
pub mod messages;
pub mod terminal;
pub mod theme;
pub mod view;
