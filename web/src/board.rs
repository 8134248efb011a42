use gloo::events::EventListener;
use gloo::timers::future::TimeoutFuture;
use lightsout_core::{self as game, Coord, Coord2, Effect, Event, Frame, Light, Session};
use yew::prelude::*;

use crate::host::{DISABLED_CLASS, HostPage};
use crate::transport;

pub(crate) enum Msg {
    Start,
    CellClick(Coord2),
    Reset,
    Reply(Event),
}

fn cell_classes(light: Light, disabled: bool) -> Classes {
    classes!("cell", light.class(), disabled.then_some(DISABLED_CLASS))
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    row: Coord,
    col: Coord,
    light: Light,
    #[prop_or_default]
    disabled: bool,
    callback: Callback<Coord2>,
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    let CellProps {
        row,
        col,
        light,
        disabled,
        callback,
    } = props.clone();

    let onclick = Callback::from(move |_: MouseEvent| {
        if disabled {
            log::trace!("({}, {}) click while disabled", row, col);
            return;
        }
        callback.emit((row, col));
    });

    html! {
        <div
            class={cell_classes(light, disabled)}
            data-row={row.to_string()}
            data-col={col.to_string()}
            {onclick}
        />
    }
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct BoardProps {
    pub host: HostPage,
    pub paint_defer_ms: u32,
}

/// Lights Out board bound to the host page, driving a [`Session`] against the server.
pub(crate) struct BoardView {
    session: Session,
    _reset_listener: EventListener,
}

impl BoardView {
    fn run(&self, ctx: &Context<Self>, effect: Effect) {
        match effect {
            Effect::Fetch(request) => {
                ctx.link()
                    .send_future(async move { Msg::Reply(transport::perform(request).await) });
            }
            Effect::PromptAfterPaint { moves, delay_ms } => {
                ctx.link().send_future(async move {
                    TimeoutFuture::new(delay_ms).await;
                    let name = gloo::dialogs::prompt(&game::win_prompt(moves), None);
                    Msg::Reply(Event::NamePrompted { name, moves })
                });
            }
            Effect::Alert(message) => gloo::dialogs::alert(&message),
            Effect::Navigate(path) => {
                log::info!("navigating to {}", path);
                if let Err(err) = gloo::utils::window().location().set_href(path) {
                    log::error!("failed to navigate to {}: {:?}", path, err);
                }
            }
        }
    }
}

impl Component for BoardView {
    type Message = Msg;
    type Properties = BoardProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let link = ctx.link().clone();
        let reset_listener = props.host.on_reset(move |_| link.send_message(Msg::Reset));
        ctx.link().send_message(Msg::Start);

        Self {
            session: Session::default().with_paint_defer(props.paint_defer_ms),
            _reset_listener: reset_listener,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        let event = match msg {
            Start => Event::Start,
            CellClick(coords) => Event::CellClicked(coords),
            Reset => Event::ResetClicked,
            Reply(event) => event,
        };

        let effects = self.session.handle(event);
        for effect in effects {
            self.run(ctx, effect);
        }
        true
    }

    fn rendered(&mut self, ctx: &Context<Self>, _first_render: bool) {
        let host = &ctx.props().host;
        host.set_interactive(self.session.is_interactive());
        host.set_reset_enabled(self.session.is_reset_enabled());
        if let Some(moves) = self.session.move_counter() {
            host.set_move_counter(moves);
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let Some(frame) = self.session.frame() else {
            return html! {};
        };
        let disabled = !self.session.is_interactive();
        frame_html(frame, disabled, ctx.link().callback(Msg::CellClick))
    }
}

/// One cell per grid position, rebuilt from the frame on every render.
fn frame_html(frame: &Frame, disabled: bool, callback: Callback<Coord2>) -> Html {
    html! {
        <>
            {
                for frame.iter().map(|((row, col), light)| html! {
                    <CellView {row} {col} {light} {disabled} callback={callback.clone()}/>
                })
            }
        </>
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use std::time::Duration;

    use lightsout_core::{BoardModel, GRID_SIZE, Legend};
    use wasm_bindgen_test::*;
    use web_sys::Element;

    use super::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[derive(Properties, PartialEq)]
    struct FrameFixtureProps {
        frame: Frame,
        disabled: bool,
    }

    #[function_component(FrameFixture)]
    fn frame_fixture(props: &FrameFixtureProps) -> Html {
        frame_html(&props.frame, props.disabled, Callback::noop())
    }

    fn frame_with_lit(lit: Coord2) -> Frame {
        let mut board = vec![vec!['O'; 5]; 5];
        board[usize::from(lit.0)][usize::from(lit.1)] = 'X';
        let mut model = BoardModel::new();
        model.capture_legend(Legend { on: 'X', off: 'O' });
        model.apply(board, 0);
        Frame::project(&model, GRID_SIZE).unwrap()
    }

    async fn render_frame(frame: Frame, disabled: bool) -> Element {
        let root = gloo::utils::document().create_element("div").unwrap();
        gloo::utils::body().append_child(&root).unwrap();
        yew::Renderer::<FrameFixture>::with_root_and_props(
            root.clone(),
            FrameFixtureProps { frame, disabled },
        )
        .render();
        yew::platform::time::sleep(Duration::from_millis(10)).await;
        root
    }

    fn cell_at(root: &Element, (row, col): Coord2) -> Element {
        root.query_selector(&format!("[data-row=\"{}\"][data-col=\"{}\"]", row, col))
            .unwrap()
            .expect("cell should be rendered")
    }

    #[wasm_bindgen_test]
    async fn renders_one_cell_per_position_with_dataset() {
        let root = render_frame(frame_with_lit((1, 3)), false).await;
        assert_eq!(root.child_element_count(), 25);

        let lit = cell_at(&root, (1, 3));
        assert_eq!(lit.get_attribute("data-row").as_deref(), Some("1"));
        assert_eq!(lit.get_attribute("data-col").as_deref(), Some("3"));
        assert!(lit.class_list().contains("cell"));
        assert!(lit.class_list().contains("light-on"));
        assert!(!lit.class_list().contains("light-off"));
        assert!(!lit.class_list().contains(DISABLED_CLASS));

        let unlit = cell_at(&root, (4, 0));
        assert!(unlit.class_list().contains("light-off"));
        assert!(!unlit.class_list().contains("light-on"));
    }

    #[wasm_bindgen_test]
    async fn gated_frame_marks_every_cell_disabled() {
        let root = render_frame(frame_with_lit((0, 0)), true).await;
        for coords in lightsout_core::iter_coords(GRID_SIZE) {
            assert!(cell_at(&root, coords).class_list().contains(DISABLED_CLASS));
        }
    }
}
