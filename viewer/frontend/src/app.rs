use std::rc::Rc;

use transon_docs::config::caption_parts;
use transon_docs::markup::{ComrakMarkup, MarkupRenderer};
use transon_docs::outline::{ExampleEntry, ExamplesSectionView, ParamView, RuleView, outline};
use transon_docs::zoon::{Rgba, map_ref, *};
use transon_docs::{ViewerConfig, ViewerSession};

use crate::panel::PlaygroundPanel;
use crate::viewport_width;

const DOCUMENT_MAX_WIDTH: u32 = 880;

pub(crate) fn primary_text_color() -> Rgba {
    color!("#1f2328")
}

pub(crate) fn muted_text_color() -> Rgba {
    color!("rgba(31, 35, 40, 0.62)")
}

pub(crate) fn panel_surface_color() -> Rgba {
    color!("#f6f8fa")
}

fn idle_button_color() -> Rgba {
    color!("rgba(3, 102, 214, 0.08)")
}

fn hovered_button_color() -> Rgba {
    color!("rgba(3, 102, 214, 0.18)")
}

fn active_button_color() -> Rgba {
    color!("rgba(3, 102, 214, 0.34)")
}

/// Markdown rendered to HTML and injected as-is.
pub(crate) fn markdown(markup: &ComrakMarkup, text: &str) -> impl Element + use<> {
    let html = markup.render(text);
    RawHtmlEl::<web_sys::HtmlElement>::new("div")
        .class("markdown")
        .prop("innerHTML", html.as_str())
}

#[derive(Clone)]
pub struct App {
    session: ViewerSession,
    config: Rc<ViewerConfig>,
    markup: Rc<ComrakMarkup>,
    /// Client width of the document, kept current on resize.
    viewport_width: Mutable<u32>,
}

impl App {
    pub fn new(session: ViewerSession, config: ViewerConfig) -> Self {
        Self {
            session,
            config: Rc::new(config),
            markup: Rc::new(ComrakMarkup::new()),
            viewport_width: Mutable::new(viewport_width()),
        }
    }

    pub fn root(&self) -> impl Element + use<> {
        El::new()
            .s(Width::fill())
            .s(Font::new().color(primary_text_color()))
            .on_viewport_size_change({
                let viewport_width = self.viewport_width.clone();
                move |_, _| viewport_width.set_neq(crate::viewport_width())
            })
            .child(
                Column::new()
                    .s(Width::fill().max(DOCUMENT_MAX_WIDTH))
                    .s(Align::new().center_x())
                    .s(Padding::new().x(16).top(32).bottom(64))
                    .s(Gap::new().y(24))
                    .item(self.header())
                    .item(self.rules()),
            )
    }

    fn header(&self) -> impl Element + use<> {
        Column::new()
            .s(Gap::new().y(8))
            .item(
                El::new()
                    .s(Font::new().size(40).weight(FontWeight::Bold))
                    .child(self.config.title.clone()),
            )
            .item(self.caption())
            .item(
                El::new()
                    .s(Font::new().color(muted_text_color()))
                    .child(self.config.tagline.clone()),
            )
            .item(
                self.session
                    .tree()
                    .doc
                    .as_deref()
                    .map(|doc| markdown(&self.markup, doc)),
            )
    }

    fn caption(&self) -> impl Element + use<> {
        Row::new()
            .s(Font::new().size(18).family([FontFamily::Monospace]))
            .update_raw_el(|raw_el| raw_el.style("white-space", "pre"))
            .items(caption_parts(&self.config.subtitle).into_iter().map(|part| {
                let font = if part.underlined {
                    Font::new().line(FontLine::new().underline().offset(3))
                } else {
                    Font::new()
                };
                El::new().s(font).child(part.text.to_owned())
            }))
    }

    fn rules(&self) -> impl Element + use<> {
        Column::new()
            .s(Gap::new().y(32))
            .item(
                El::new()
                    .s(Font::new().size(28).weight(FontWeight::SemiBold))
                    .child("Rules"),
            )
            .items(outline(self.session.tree()).into_iter().map(|rule| self.rule(rule)))
    }

    fn rule(&self, rule: RuleView) -> impl Element + use<> {
        let id = rule.name.clone();
        let params = if rule.params.is_empty() {
            None
        } else {
            Some(self.params(rule.params))
        };
        Column::new()
            .s(Gap::new().y(12))
            .update_raw_el(move |raw_el| raw_el.attr("id", id.as_str()))
            .item(
                El::new()
                    .s(Font::new().size(22).weight(FontWeight::SemiBold).family([FontFamily::Monospace]))
                    .child(rule.name),
            )
            .item(rule.doc.as_deref().map(|doc| markdown(&self.markup, doc)))
            .item(rule.examples.map(|section| self.examples_section(section)))
            .item(params)
    }

    fn params(&self, params: Vec<ParamView>) -> impl Element + use<> {
        Column::new()
            .s(Gap::new().y(12))
            .item(
                El::new()
                    .s(Font::new().size(18).weight(FontWeight::SemiBold))
                    .child("Parameters"),
            )
            .items(params.into_iter().map(|param| self.param(param)))
    }

    fn param(&self, param: ParamView) -> impl Element + use<> {
        let id = param.scope.clone();
        Column::new()
            .s(Gap::new().y(8))
            .s(Padding::new().left(16))
            .update_raw_el(move |raw_el| raw_el.attr("id", id.as_str()))
            .item(
                El::new()
                    .s(Font::new().weight(FontWeight::SemiBold).family([FontFamily::Monospace]))
                    .child(param.name),
            )
            .item(param.doc.as_deref().map(|doc| markdown(&self.markup, doc)))
            .item(param.examples.map(|section| self.examples_section(section)))
    }

    /// Toggle buttons of one scope, then the playground if the active example is one of them.
    fn examples_section(&self, section: ExamplesSectionView) -> impl Element + use<> {
        let section = Rc::new(section);
        Column::new()
            .s(Width::fill())
            .s(Gap::new().y(12))
            .item(
                Row::new()
                    .s(Gap::new().x(8).y(6))
                    .update_raw_el(|raw_el| raw_el.style("flex-wrap", "wrap"))
                    .item(
                        El::new()
                            .s(Font::new().color(muted_text_color()))
                            .child("Examples:"),
                    )
                    .items(section.entries.iter().map(|entry| self.example_button(entry))),
            )
            .item_signal(self.session.active_playground_signal().map({
                let this = self.clone();
                move |playground| {
                    playground
                        .filter(|playground| section.contains(playground.slug()))
                        .map(|playground| {
                            PlaygroundPanel::new(
                                playground,
                                this.viewport_width.clone(),
                                this.config.scroll_debounce_ms,
                                Rc::clone(&this.markup),
                            )
                            .root()
                        })
                }
            }))
    }

    fn example_button(&self, entry: &ExampleEntry) -> impl Element + use<> {
        let hovered = Mutable::new(false);
        let slug = entry.slug.clone();
        let id = slug.to_string();
        Button::new()
            .s(Padding::new().x(10).y(4))
            .s(RoundedCorners::all(6))
            .s(Font::new().size(14).family([FontFamily::Monospace]).no_wrap())
            .s(Background::new().color_signal(map_ref! {
                let is_active = self.session.selection().is_active_signal(slug.clone()),
                let is_hovered = hovered.signal() =>
                match (*is_active, *is_hovered) {
                    (true, _) => active_button_color(),
                    (false, true) => hovered_button_color(),
                    (false, false) => idle_button_color(),
                }
            }))
            .update_raw_el(move |raw_el| raw_el.attr("id", id.as_str()))
            .label(entry.name.clone())
            .on_hovered_change(move |is_hovered| hovered.set(is_hovered))
            .on_press({
                let session = self.session.clone();
                move || session.toggle(&slug)
            })
    }
}
