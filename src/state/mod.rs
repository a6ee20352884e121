/// State management module
///
/// This module handles application state outside the page itself:
/// - Locating and loading site markup files (site.rs)
/// - Smooth scroll animation of the page viewport (scroll.rs)

pub mod scroll;
pub mod site;
