//! The playground of the active example, broken out of the document column.

use std::cell::RefCell;
use std::rc::Rc;

use transon_docs::clock::Clock;
use transon_docs::debounce::Debounce;
use transon_docs::layout::{BreakoutController, BreakoutLayout, ScrollBehavior, ScrollBlock, ScrollRequest};
use transon_docs::markup::ComrakMarkup;
use transon_docs::zoon::{Rgba, *};
use transon_docs::Playground;
use web_sys::{HtmlElement, HtmlTextAreaElement, ScrollIntoViewOptions, ScrollLogicalPosition};

use crate::BrowserClock;
use crate::app::{markdown, muted_text_color, panel_surface_color};

fn error_surface_color() -> Rgba {
    color!("#ffebe9")
}

fn error_text_color() -> Rgba {
    color!("#82071e")
}

pub struct PlaygroundPanel {
    playground: Rc<Playground>,
    breakout: BreakoutController,
    viewport_width: Mutable<u32>,
    markup: Rc<ComrakMarkup>,
    container: Mutable<Option<HtmlElement>>,
    scroll: Rc<RefCell<Debounce<HtmlElement>>>,
    scroll_task: Mutable<Option<TaskHandle>>,
}

impl PlaygroundPanel {
    pub fn new(
        playground: Rc<Playground>,
        viewport_width: Mutable<u32>,
        scroll_debounce_ms: u64,
        markup: Rc<ComrakMarkup>,
    ) -> Rc<Self> {
        Rc::new(Self {
            playground,
            breakout: BreakoutController::new(),
            viewport_width,
            markup,
            container: Mutable::new(None),
            scroll: Rc::new(RefCell::new(Debounce::new(scroll_debounce_ms))),
            scroll_task: Mutable::new(None),
        })
    }

    /// The container stays in the document flow; its measured offset drives the
    /// breakout of the content rendered inside it.
    pub fn root(self: Rc<Self>) -> impl Element + use<> {
        let relayout_task = Task::start_droppable(self.viewport_width.signal().for_each_sync({
            let this = Rc::clone(&self);
            move |width| {
                this.breakout.observe_viewport_width(width);
                this.measure_container();
            }
        }));
        El::new()
            .s(Width::fill())
            .update_raw_el({
                let this = Rc::clone(&self);
                move |raw_el| {
                    raw_el
                        .after_insert({
                            let this = Rc::clone(&this);
                            move |element| this.container_inserted(element)
                        })
                        .after_remove(move |_| {
                            this.container_removed();
                            drop(relayout_task);
                        })
                }
            })
            .child_signal(self.breakout.state_signal().map({
                let this = Rc::clone(&self);
                move |state| state.layout().map(|layout| this.content(layout))
            }))
    }

    fn container_inserted(&self, element: HtmlElement) {
        self.container.set(Some(element.clone()));
        self.measure_container();
        self.arm_scroll(element);
    }

    fn container_removed(&self) {
        self.scroll.borrow_mut().cancel();
        self.scroll_task.set(None);
        self.container.set(None);
        self.breakout.observe_container_offset(None);
    }

    fn measure_container(&self) {
        let offset = self.container.lock_ref().as_ref().map(|element| element.offset_left());
        self.breakout.observe_container_offset(offset);
    }

    /// Restart the quiet window; the previous arm's task is dropped with its handle.
    fn arm_scroll(&self, element: HtmlElement) {
        let token = self.scroll.borrow_mut().track(element, BrowserClock.now_ms());
        let delay_ms = self.scroll.borrow().delay_ms();
        let container = self.container.clone();
        let scroll = Rc::clone(&self.scroll);
        self.scroll_task.set(Some(Task::start_droppable(async move {
            let mut wait_ms = delay_ms;
            loop {
                Timer::sleep(u32::try_from(wait_ms).unwrap_or(u32::MAX)).await;
                let now_ms = BrowserClock.now_ms();
                let mut debounce = scroll.borrow_mut();
                if let Some(element) = debounce.fire(token, now_ms) {
                    // Removed containers are not scrolled to.
                    if container.lock_ref().is_some() {
                        scroll_into_view(&element, ScrollRequest::REVEAL_PLAYGROUND);
                    }
                    break;
                }
                match debounce.due_at_ms() {
                    Some(due_at_ms) => wait_ms = due_at_ms.saturating_sub(now_ms).max(1),
                    None => break,
                }
            }
        })));
    }

    fn content(&self, layout: BreakoutLayout) -> impl Element + use<> {
        let example = self.playground.example();
        let left = layout.left_css();
        Column::new()
            .s(Width::exact(layout.width))
            .s(Padding::new().x(24).y(20))
            .s(Gap::new().y(12))
            .s(Background::new().color(panel_surface_color()))
            .update_raw_el(move |raw_el| raw_el.style("position", "relative").style("left", left.as_str()))
            .item(
                El::new()
                    .s(Font::new().size(18).weight(FontWeight::SemiBold).family([FontFamily::Monospace]))
                    .child(example.name.clone()),
            )
            .item(example.doc.as_deref().map(|doc| markdown(&self.markup, doc)))
            .item(
                Row::new()
                    .s(Width::fill())
                    .s(Align::new().top())
                    .s(Gap::new().x(12))
                    .item(editor_column("input", self.input_editor()))
                    .item(editor_column("template", self.template_editor()))
                    .item(editor_column("result", self.result_view())),
            )
            .item_signal(self.playground.error_signal().map(|error| error.map(error_banner)))
    }

    fn input_editor(&self) -> RawHtmlEl<HtmlTextAreaElement> {
        let playground = Rc::clone(&self.playground);
        editable_text_area(self.playground.input_text_signal(), move |text| {
            playground.edit_input(text)
        })
    }

    fn template_editor(&self) -> RawHtmlEl<HtmlTextAreaElement> {
        let playground = Rc::clone(&self.playground);
        editable_text_area(self.playground.template_text_signal(), move |text| {
            playground.edit_template(text)
        })
    }

    fn result_view(&self) -> RawHtmlEl<HtmlTextAreaElement> {
        text_area(self.playground.result_text_signal()).attr("readonly", "")
    }
}

fn editor_column(label: &'static str, text_area: RawHtmlEl<HtmlTextAreaElement>) -> impl Element {
    Column::new()
        .s(Width::fill())
        .s(Gap::new().y(4))
        .item(
            El::new()
                .s(Font::new().size(13).color(muted_text_color()))
                .child(label),
        )
        .item(text_area)
}

fn text_area(text: impl Signal<Item = String> + Unpin + 'static) -> RawHtmlEl<HtmlTextAreaElement> {
    RawHtmlEl::<HtmlTextAreaElement>::new("textarea")
        .attr("spellcheck", "false")
        .attr("rows", "14")
        .style("width", "100%")
        .style("box-sizing", "border-box")
        .style("resize", "vertical")
        .style("font-family", "monospace")
        .style("font-size", "13px")
        .prop_signal("value", text)
}

fn editable_text_area(
    text: impl Signal<Item = String> + Unpin + 'static,
    on_edit: impl Fn(String) + 'static,
) -> RawHtmlEl<HtmlTextAreaElement> {
    let text_area = text_area(text);
    let dom_element = text_area.dom_element();
    text_area.event_handler(move |_: events::Input| on_edit(dom_element.value()))
}

fn error_banner(message: String) -> impl Element {
    El::new()
        .s(Width::fill())
        .s(Padding::new().x(12).y(8))
        .s(RoundedCorners::all(6))
        .s(Background::new().color(error_surface_color()))
        .s(Font::new().size(13).color(error_text_color()).family([FontFamily::Monospace]))
        .child(message)
}

fn scroll_into_view(element: &HtmlElement, request: ScrollRequest) {
    let options = ScrollIntoViewOptions::new();
    options.set_block(match request.block {
        ScrollBlock::Start => ScrollLogicalPosition::Start,
        ScrollBlock::Center => ScrollLogicalPosition::Center,
        ScrollBlock::End => ScrollLogicalPosition::End,
        ScrollBlock::Nearest => ScrollLogicalPosition::Nearest,
    });
    options.set_behavior(match request.behavior {
        ScrollBehavior::Auto => web_sys::ScrollBehavior::Auto,
        ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
    });
    element.scroll_into_view_with_scroll_into_view_options(&options);
}
