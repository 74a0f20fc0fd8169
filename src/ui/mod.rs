/// UI layer: control panels and the dashboard renderer.
pub mod charts;
pub mod panels;
#[cfg(feature = "wordcloud")]
pub mod wordcloud;
