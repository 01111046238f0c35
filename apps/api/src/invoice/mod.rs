// Invoice form backend: drafts, totals, edits, printable output and logo upload.
// Stateless: every call receives the whole invoice from the browser.

pub mod editor;
pub mod handlers;
pub mod logo;
pub mod models;
pub mod render;
pub mod totals;
