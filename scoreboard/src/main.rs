use iced::{
    mouse,
    widget::{
        button,
        canvas::{self, Canvas, Frame, Geometry, Path},
        column, container, pick_list, row, text, tooltip, Column, Container,
    },
    Alignment, Color, Element, Length, Point, Rectangle, Renderer, Size, Subscription, Task,
    Theme,
};
use leaderboard_core::prelude::BACKEND_URL;
use leaderboard_core::{
    ChannelEvent, ConnectionManager, ControlClient, ControlCommand, ControlResponse,
    DisplayEntry, EventKind, LeaderboardView, Rgb, TimeWindow, Transport,
};
use socket::SocketLink;

mod http;
mod socket;

fn main() -> iced::Result {
    env_logger::init();
    iced::application(Scoreboard::boot, Scoreboard::update, Scoreboard::view)
        .title(application_title)
        .subscription(application_subscription)
        .theme(application_theme)
        .run()
}

fn application_title(_: &Scoreboard) -> String {
    "Live Leaderboard".into()
}

fn application_subscription(state: &Scoreboard) -> Subscription<Message> {
    if state.connection.transport().is_open() {
        Subscription::run(socket::connect).map(Message::Channel)
    } else {
        Subscription::none()
    }
}

fn application_theme(_: &Scoreboard) -> Theme {
    Theme::Dark
}

struct Scoreboard {
    connection: ConnectionManager<SocketLink, LeaderboardView>,
    board: LeaderboardView,
    control: ControlClient,
    in_flight: Option<ControlCommand>,
}

#[derive(Debug, Clone)]
enum Message {
    Channel(ChannelEvent),
    ToggleUpdates,
    ControlFinished(ControlCommand, ControlResponse),
    WindowSelected(TimeWindow),
}

impl Scoreboard {
    fn boot() -> (Self, Task<Message>) {
        let mut connection = ConnectionManager::new(SocketLink::default());
        connection.subscribe(
            EventKind::LeaderboardUpdate,
            |board: &mut LeaderboardView, event| {
                if let ChannelEvent::LeaderboardUpdate(snapshot) = event {
                    board.apply_snapshot(*snapshot);
                }
            },
        );
        connection.connect();

        (
            Scoreboard {
                connection,
                board: LeaderboardView::new(),
                control: ControlClient::new(BACKEND_URL),
                in_flight: None,
            },
            Task::none(),
        )
    }

    fn update(state: &mut Self, message: Message) -> Task<Message> {
        match message {
            Message::Channel(event) => {
                state.connection.deliver(&mut state.board, event);
                Task::none()
            }
            Message::ToggleUpdates => {
                if state.in_flight.is_some() {
                    return Task::none();
                }
                let request = state.control.toggle();
                let command = request.command;
                state.in_flight = Some(command);
                Task::perform(http::send(request), move |response| {
                    Message::ControlFinished(command, response)
                })
            }
            Message::ControlFinished(command, response) => {
                state.in_flight = None;
                state.control.resolve(command, response);
                Task::none()
            }
            Message::WindowSelected(window) => {
                state.board.select_window(window);
                Task::none()
            }
        }
    }

    fn view(state: &Self) -> Element<'_, Message> {
        let status = state.connection.status();
        let status_color = if status.is_connected() {
            Color::from_rgb(0.13, 0.77, 0.37)
        } else {
            Color::from_rgb(0.94, 0.27, 0.27)
        };

        let header = row![
            text("📊 Live Leaderboard").size(28),
            container(row![
                text("Status: ").size(16),
                text(status.label()).size(16).color(status_color),
            ])
            .width(Length::Fill)
            .align_right(Length::Fill),
        ]
        .align_y(Alignment::Center)
        .spacing(20);

        let toggle = button(text(format!("⏸️ {}", state.control.toggle_label())))
            .on_press_maybe(state.in_flight.is_none().then_some(Message::ToggleUpdates))
            .padding(10);

        let selector = pick_list(
            TimeWindow::ALL,
            Some(state.board.selected()),
            Message::WindowSelected,
        )
        .padding(8);

        let controls = row![toggle, selector]
            .spacing(16)
            .align_y(Alignment::Center);

        let rows = state
            .board
            .entries()
            .iter()
            .fold(Column::new().spacing(12), |col, entry| {
                col.push(house_row(entry))
            });

        let layout = column![header, controls, rows].spacing(24).padding(24);

        Container::new(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

fn house_row(entry: &DisplayEntry) -> Element<'_, Message> {
    let bar = Canvas::new(PointsBar {
        proportion: entry.proportion,
        color: entry.color,
    })
    .width(Length::Fill)
    .height(Length::Fixed(28.0));

    let details = container(
        row![
            text(entry.emblem),
            text(entry.name),
            text(format!("count: {}", entry.points)),
        ]
        .spacing(8),
    )
    .padding(6)
    .style(container::rounded_box);

    row![
        row![text(entry.emblem).size(22), text(entry.name).size(18)]
            .spacing(8)
            .width(Length::Fixed(200.0)),
        tooltip(bar, details, tooltip::Position::FollowCursor),
    ]
    .spacing(12)
    .align_y(Alignment::Center)
    .into()
}

fn to_color(rgb: Rgb) -> Color {
    let [r, g, b] = rgb.to_f32();
    Color::from_rgb(r, g, b)
}

/// Horizontal bar filled to `proportion` of the available width.
#[derive(Clone)]
struct PointsBar {
    proportion: f32,
    color: Rgb,
}

impl canvas::Program<Message> for PointsBar {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(
            Point::ORIGIN,
            bounds.size(),
            Color::from_rgb(0.12, 0.12, 0.14),
        );

        let width = bounds.width * self.proportion.clamp(0.0, 1.0);
        if width > 0.0 {
            let bar = Path::rectangle(Point::ORIGIN, Size::new(width, bounds.height));
            frame.fill(&bar, to_color(self.color));
        }

        vec![frame.into_geometry()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leaderboard_core::{Connectivity, ControlError, Group, GroupTotals, Snapshot};

    fn booted() -> Scoreboard {
        Scoreboard::boot().0
    }

    #[test]
    fn boot_opens_channel_with_defaults() {
        let state = booted();
        assert!(state.connection.transport().is_open());
        assert_eq!(state.connection.status(), Connectivity::Disconnected);
        assert_eq!(state.board.selected(), TimeWindow::OneHour);
        assert!(!state.control.updates_active());
    }

    #[test]
    fn channel_messages_update_status_and_board() {
        let mut state = booted();
        let _ = Scoreboard::update(&mut state, Message::Channel(ChannelEvent::Connect));
        assert_eq!(state.connection.status(), Connectivity::Connected);

        let snapshot = Snapshot {
            one_hour: GroupTotals {
                gryff: 30,
                slyth: 50,
                raven: 10,
                huff: 0,
            },
            ..Default::default()
        };
        let _ = Scoreboard::update(
            &mut state,
            Message::Channel(ChannelEvent::LeaderboardUpdate(snapshot)),
        );
        let order: Vec<Group> = state.board.entries().iter().map(|e| e.group).collect();
        assert_eq!(order, vec![Group::Slyth, Group::Gryff, Group::Raven, Group::Huff]);

        let _ = Scoreboard::update(&mut state, Message::WindowSelected(TimeWindow::AllTime));
        assert_eq!(state.board.max_points(), 0);
    }

    #[test]
    fn toggle_is_gated_while_a_call_is_in_flight() {
        let mut state = booted();
        let _ = Scoreboard::update(&mut state, Message::ToggleUpdates);
        assert_eq!(state.in_flight, Some(ControlCommand::Start));

        let _ = Scoreboard::update(&mut state, Message::ToggleUpdates);
        assert_eq!(state.in_flight, Some(ControlCommand::Start));

        let _ = Scoreboard::update(
            &mut state,
            Message::ControlFinished(ControlCommand::Start, Ok(200)),
        );
        assert!(state.in_flight.is_none());
        assert!(state.control.updates_active());
    }

    #[test]
    fn failed_control_call_keeps_flag() {
        let mut state = booted();
        let _ = Scoreboard::update(
            &mut state,
            Message::ControlFinished(
                ControlCommand::Start,
                Err(ControlError::Request("refused".into())),
            ),
        );
        assert!(!state.control.updates_active());
    }
}
