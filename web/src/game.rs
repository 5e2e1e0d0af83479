use crate::utils::*;
use clap::Args;
use nochmal_core as game;
use game::{Color, Coord, Coord2, GameError, GameState, Opacity, ScoreBreakdown, ToggleAction};
use yew::prelude::*;

/// Dialog currently blocking the sheet.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Prompt {
    Unreachable(Coord2),
    ConfirmClear(ToggleAction),
}

impl Prompt {
    fn title(self) -> &'static str {
        use Prompt::*;
        use ToggleAction::*;
        match self {
            Unreachable(_) => "Das Feld ist noch nicht erreichbar.",
            ConfirmClear(Cell(_)) => "Das Feld ist bereits abgekreuzt. Kreuz löschen?",
            ConfirmClear(Joker(_)) => "Der Joker ist bereits abgekreuzt. Kreuz löschen?",
            ConfirmClear(ColumnClaimed(_)) => {
                "Der Spaltenbonus ist bereits vergeben. Markierung löschen?"
            }
            ConfirmClear(ColorClaimed(_)) => {
                "Der Farbbonus ist bereits vergeben. Markierung löschen?"
            }
            ConfirmClear(HighlightColor(_) | ReachableOnly) => "Markierung löschen?",
        }
    }
}

/// Sheet plus whatever prompt the player still has to answer.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct SheetSession {
    pub state: GameState,
    pub prompt: Option<Prompt>,
}

impl SheetSession {
    fn new(show_all: bool) -> Self {
        let state = GameState::default();
        let state = if show_all {
            state.apply_toggle(ToggleAction::ReachableOnly).unwrap_or(state)
        } else {
            state
        };
        Self {
            state,
            prompt: None,
        }
    }

    /// Clearing a set flag waits for [`SheetSession::confirm`], everything else applies right away.
    fn request(&mut self, action: ToggleAction) -> bool {
        if self.prompt.is_some() {
            return false;
        }

        if self.state.requires_confirmation(action) {
            log::debug!("confirm before clearing: {:?}", action);
            self.prompt = Some(Prompt::ConfirmClear(action));
            return true;
        }

        self.apply(action)
    }

    fn confirm(&mut self) -> bool {
        match self.prompt.take() {
            Some(Prompt::ConfirmClear(action)) => {
                self.apply(action);
                true
            }
            Some(Prompt::Unreachable(_)) => true,
            None => false,
        }
    }

    fn dismiss(&mut self) -> bool {
        self.prompt.take().is_some()
    }

    fn apply(&mut self, action: ToggleAction) -> bool {
        match self.state.apply_toggle(action) {
            Ok(next) => {
                self.state = next;
                true
            }
            Err(GameError::Unreachable(coords)) => {
                log::debug!("cell not reachable: {:?}", coords);
                self.prompt = Some(Prompt::Unreachable(coords));
                true
            }
            Err(err) => {
                log::warn!("ignored {:?}: {}", action, err);
                false
            }
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Toggle(ToggleAction),
    Confirm,
    Dismiss,
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Start with every cell at full opacity instead of grading by reachability
    #[arg(long)]
    show_all: bool,
}

#[derive(Debug)]
pub(crate) struct GameView {
    session: SheetSession,
}

impl GameView {
    fn view_toolbar(&self, ctx: &Context<Self>, score: &ScoreBreakdown) -> Html {
        let state = &self.session.state;
        let reachable_only = state.highlight().reachable_only;
        let filter_opacity = if reachable_only {
            Opacity::Full
        } else {
            Opacity::Faded
        };
        let cb_reachable_only = ctx
            .link()
            .callback(|_| Msg::Toggle(ToggleAction::ReachableOnly));

        html! {
            <div class="toolbar">
                {
                    for Color::ALL.into_iter().map(|color| {
                        let onclick = ctx
                            .link()
                            .callback(move |_| Msg::Toggle(ToggleAction::HighlightColor(color)));
                        let style = opacity_style(state.color_opacity(color));
                        html! {
                            <div class={classes!("cell", color.name())} {style} {onclick}>
                                {score.missing(color).to_string()}
                            </div>
                        }
                    })
                }
                <div class="cell white" style={opacity_style(filter_opacity)} onclick={cb_reachable_only}>
                    {game::CROSS.to_string()}
                </div>
                <table>
                    <tr>
                        <td class="point-cell">{"Bonus"}</td>
                        <td class="point-cell">{"A-O"}</td>
                        <td class="point-cell">{"! "}<span class="small">{"(+1)"}</span></td>
                        <td class="point-cell">{format!("{} ", game::STAR)}<span class="small">{"(-2)"}</span></td>
                        <td class="point-cell">{"Total"}</td>
                    </tr>
                    <tr>
                        <td class="point-cell">{score.bonus_points.to_string()}</td>
                        <td class="point-cell">{score.column_points.to_string()}</td>
                        <td class="point-cell">{score.joker_points.to_string()}</td>
                        <td class="point-cell">{score.star_penalty.to_string()}</td>
                        <td class="point-cell">{score.total.to_string()}</td>
                    </tr>
                </table>
            </div>
        }
    }

    fn view_claims(&self, ctx: &Context<Self>) -> Html {
        let state = &self.session.state;

        html! {
            <div class="claims">
                {
                    for Color::ALL.into_iter().map(|color| {
                        let claimed = state.is_color_claimed(color);
                        let onclick = ctx
                            .link()
                            .callback(move |_| Msg::Toggle(ToggleAction::ColorClaimed(color)));
                        html! {
                            <div class={classes!("cell", "claim", color.name(), claimed.then_some("claimed"))} {onclick}>
                                {if claimed { game::CROSS.to_string() } else { String::new() }}
                            </div>
                        }
                    })
                }
                {
                    for state.jokers().into_iter().enumerate().map(|(index, crossed)| {
                        let glyph = if crossed { game::CROSS } else { '!' };
                        let onclick = ctx
                            .link()
                            .callback(move |_| Msg::Toggle(ToggleAction::Joker(index)));
                        html! {
                            <div class={classes!("cell", "joker", crossed.then_some("crossed"))} {onclick}>
                                {glyph.to_string()}
                            </div>
                        }
                    })
                }
            </div>
        }
    }

    fn view_cell(&self, ctx: &Context<Self>, coords: Coord2) -> Html {
        let state = &self.session.state;
        let Some(field) = state.field_at(coords) else {
            return html! {};
        };
        let show_star = field.has_star && !state.is_crossed(coords);
        let class = classes!("cell", field.color.name(), show_star.then_some("star"));
        let style = opacity_style(state.cell_opacity(coords));
        let onclick = ctx
            .link()
            .callback(move |_| Msg::Toggle(ToggleAction::Cell(coords)));
        let glyph = state.cell_glyph(coords).map(String::from).unwrap_or_default();

        html! {
            <td {class} {style} {onclick}>{glyph}</td>
        }
    }

    fn view_bonus_row(&self, ctx: &Context<Self>, score: &ScoreBreakdown, second: bool) -> Html {
        let state = &self.session.state;
        let cols: Coord = state.size().0;

        html! {
            <tr class="table-head">
                {
                    for (0..cols).filter_map(|col| {
                        let bonus = state.layout().column_bonus(col)?;
                        let claimed = state.is_column_claimed(col);
                        let earned = score.is_column_complete(col) && claimed == second;
                        let taken = !second && claimed;
                        let onclick = ctx
                            .link()
                            .callback(move |_| Msg::Toggle(ToggleAction::ColumnClaimed(col)));
                        let value = if second { bonus.second } else { bonus.first };
                        Some(html! {
                            <td class={classes!(earned.then_some("earned"), taken.then_some("claimed"))} {onclick}>
                                {value.to_string()}
                            </td>
                        })
                    })
                }
            </tr>
        }
    }

    fn view_sheet(&self, ctx: &Context<Self>, score: &ScoreBreakdown) -> Html {
        let state = &self.session.state;
        let (cols, rows) = state.size();

        html! {
            <table class="grid-table">
                <tbody>
                    <tr class="table-head">
                        {
                            for (0..cols).map(|col| html! {
                                <td>{state.layout().column_label(col).map(String::from).unwrap_or_default()}</td>
                            })
                        }
                    </tr>
                    {
                        for (0..rows).map(|y| html! {
                            <tr>
                                { for (0..cols).map(|x| self.view_cell(ctx, (x, y))) }
                            </tr>
                        })
                    }
                    {self.view_bonus_row(ctx, score, false)}
                    {self.view_bonus_row(ctx, score, true)}
                </tbody>
            </table>
        }
    }

    fn view_prompt(&self, ctx: &Context<Self>) -> Html {
        let Some(prompt) = self.session.prompt else {
            return html! {};
        };

        let cb_confirm = ctx.link().callback(|_| Msg::Confirm);
        let cb_dismiss = ctx.link().callback(|_| Msg::Dismiss);

        match prompt {
            Prompt::Unreachable(_) => html! {
                <Modal title={prompt.title()}>
                    <menu>
                        <button onclick={cb_dismiss}>{"Ok"}</button>
                    </menu>
                </Modal>
            },
            Prompt::ConfirmClear(_) => html! {
                <Modal title={prompt.title()}>
                    <menu>
                        <button onclick={cb_confirm}>{"Ja, Kreuz löschen"}</button>
                        <button onclick={cb_dismiss}>{"Nein, Kreuz behalten"}</button>
                    </menu>
                </Modal>
            },
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            session: SheetSession::new(ctx.props().show_all),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        log::trace!("msg: {:?}", msg);
        match msg {
            Toggle(action) => self.session.request(action),
            Confirm => self.session.confirm(),
            Dismiss => self.session.dismiss(),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let score = self.session.state.compute_score();

        html! {
            <div class="nochmal">
                <div class="card">
                    {self.view_toolbar(ctx, &score)}
                    {self.view_claims(ctx)}
                </div>
                <div class="card">
                    <div class="h-border"/>
                    {self.view_sheet(ctx, &score)}
                </div>
                {self.view_prompt(ctx)}
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_click_opens_notice_and_keeps_sheet() {
        let mut session = SheetSession::new(false);

        assert!(session.request(ToggleAction::Cell((0, 0))));

        assert_eq!(session.prompt, Some(Prompt::Unreachable((0, 0))));
        assert_eq!(session.state, GameState::default());
        assert!(session.confirm());
        assert_eq!(session.prompt, None);
        assert_eq!(session.state, GameState::default());
    }

    #[test]
    fn crossing_applies_without_prompt() {
        let mut session = SheetSession::new(false);

        assert!(session.request(ToggleAction::Cell((7, 2))));

        assert_eq!(session.prompt, None);
        assert!(session.state.is_crossed((7, 2)));
    }

    #[test]
    fn clearing_waits_for_confirmation() {
        let mut session = SheetSession::new(false);
        session.request(ToggleAction::Cell((7, 2)));

        assert!(session.request(ToggleAction::Cell((7, 2))));
        assert_eq!(
            session.prompt,
            Some(Prompt::ConfirmClear(ToggleAction::Cell((7, 2))))
        );
        assert!(session.state.is_crossed((7, 2)));

        assert!(session.dismiss());
        assert!(session.state.is_crossed((7, 2)));

        session.request(ToggleAction::Cell((7, 2)));
        assert!(session.confirm());
        assert!(!session.state.is_crossed((7, 2)));
    }

    #[test]
    fn open_prompt_blocks_other_clicks() {
        let mut session = SheetSession::new(false);
        session.request(ToggleAction::Cell((0, 0)));

        assert!(!session.request(ToggleAction::Cell((7, 0))));
        assert!(!session.state.is_crossed((7, 0)));
    }

    #[test]
    fn highlight_toggles_apply_immediately() {
        let mut session = SheetSession::new(false);

        session.request(ToggleAction::HighlightColor(Color::Red));
        session.request(ToggleAction::HighlightColor(Color::Red));

        assert_eq!(session.prompt, None);
        assert!(session.state.highlight().colors.is_empty());
    }

    #[test]
    fn joker_row_follows_session_state() {
        let mut session = SheetSession::new(false);

        session.request(ToggleAction::Joker(3));

        let jokers = session.state.jokers();
        assert_eq!(jokers.len(), game::JOKER_COUNT);
        assert_eq!(
            jokers.iter().position(|&crossed| crossed),
            Some(3)
        );
        assert!(session.request(ToggleAction::Joker(3)));
        assert_eq!(
            session.prompt,
            Some(Prompt::ConfirmClear(ToggleAction::Joker(3)))
        );
    }

    #[test]
    fn show_all_disables_reachable_only() {
        assert!(SheetSession::new(false).state.highlight().reachable_only);
        assert!(!SheetSession::new(true).state.highlight().reachable_only);
    }

    #[test]
    fn prompt_titles_use_sheet_wording() {
        assert_eq!(
            Prompt::Unreachable((1, 1)).title(),
            "Das Feld ist noch nicht erreichbar."
        );
        assert_eq!(
            Prompt::ConfirmClear(ToggleAction::Cell((1, 1))).title(),
            "Das Feld ist bereits abgekreuzt. Kreuz löschen?"
        );
    }
}
