use super::RoutePrompt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    RouteRequest(RoutePrompt),
}
