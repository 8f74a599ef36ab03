use std::path::Path;

use maud::{html, Markup, PreEscaped, DOCTYPE};
use plotly::Plot;

use crate::error::Result;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.12.1.min.js";

const STYLE: &str = "
body { font-family: Helvetica, Arial, sans-serif; margin: 0 auto; max-width: 1300px; padding: 0 20px; }
header { display: flex; align-items: center; gap: 16px; border-bottom: 1px solid #ccc; padding: 12px 0; }
header img { height: 56px; }
header .version { color: #777; font-size: 0.9em; }
section { margin: 28px 0; }
section h2 { border-bottom: 1px solid #eee; padding-bottom: 4px; }
.plot { margin: 12px 0; }
";

#[derive(Clone)]
enum Block {
    Content(Markup),
    Plot(Plot),
}

// `plotly::Plot` does not implement `Debug`, so it is shown opaquely.
impl std::fmt::Debug for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Block::Content(markup) => f.debug_tuple("Content").field(markup).finish(),
            Block::Plot(_) => f.debug_tuple("Plot").field(&"..").finish(),
        }
    }
}

/// A titled block of a [`Report`]: free HTML and plots, in insertion order.
#[derive(Debug, Clone)]
pub struct ReportSection {
    title: String,
    blocks: Vec<Block>,
}

impl ReportSection {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            blocks: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn add_content(&mut self, content: Markup) {
        self.blocks.push(Block::Content(content));
    }

    pub fn add_plot(&mut self, plot: Plot) {
        self.blocks.push(Block::Plot(plot));
    }

    pub fn add_plots(&mut self, plots: impl IntoIterator<Item = Plot>) {
        self.blocks.extend(plots.into_iter().map(Block::Plot));
    }

    pub fn plot_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| matches!(b, Block::Plot(_)))
            .count()
    }

    fn render(&self, section_index: usize) -> Markup {
        html! {
            section {
                h2 { (self.title) }
                @for (i, block) in self.blocks.iter().enumerate() {
                    @match block {
                        Block::Content(markup) => div class="content" { (markup) },
                        Block::Plot(plot) => div class="plot" {
                            (PreEscaped(plot.to_inline_html(Some(&format!("plot-{}-{}", section_index, i)))))
                        },
                    }
                }
            }
        }
    }
}

/// A standalone HTML page of plots grouped into sections.
///
/// plotly.js is loaded once in the page head; each plot is embedded as an
/// inline `div` that draws into it.
#[derive(Debug, Clone)]
pub struct Report {
    name: String,
    version: String,
    logo: Option<String>,
    title: String,
    sections: Vec<ReportSection>,
}

impl Report {
    pub fn new(name: &str, version: &str, logo: Option<&str>, title: &str) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
            logo: logo.map(str::to_string),
            title: title.to_string(),
            sections: Vec::new(),
        }
    }

    pub fn add_section(&mut self, section: ReportSection) {
        self.sections.push(section);
    }

    pub fn sections(&self) -> &[ReportSection] {
        &self.sections
    }

    pub fn render(&self) -> Markup {
        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="utf-8";
                    title { (self.title) }
                    script src=(PLOTLY_CDN) {}
                    style { (PreEscaped(STYLE)) }
                }
                body {
                    header {
                        @if let Some(logo) = &self.logo {
                            img src=(logo) alt=(self.name);
                        }
                        div {
                            h1 { (self.title) }
                            span class="version" { (self.name) " v" (self.version) }
                        }
                    }
                    @for (i, section) in self.sections.iter().enumerate() {
                        (section.render(i))
                    }
                }
            }
        }
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.render().into_string())?;
        log::info!("Report saved to {}", path.display());
        Ok(())
    }
}
