//! One HTTP round-trip per call, decoded into the wire types.

use gloo::net::http::{Request as HttpRequest, Response};
use lightsout_core::{ApiError, Coord2, Event, Request};
use lightsout_protocol::{ClickReply, Endpoint, Method, ScoreSubmission, StateReply, SubmitReply};
use serde::de::DeserializeOwned;

pub type Result<T> = core::result::Result<T, ApiError>;

pub async fn get_game_state() -> Result<StateReply> {
    fetch(Endpoint::GameState, None).await
}

pub async fn post_click((row, col): Coord2) -> Result<ClickReply> {
    fetch(Endpoint::Click(row, col), None).await
}

pub async fn post_reset() -> Result<StateReply> {
    fetch(Endpoint::Reset, None).await
}

pub async fn post_score(submission: &ScoreSubmission) -> Result<SubmitReply> {
    fetch(Endpoint::SubmitScore, Some(submission)).await
}

/// Performs `request` and wraps the outcome as the event the session expects back.
pub async fn perform(request: Request) -> Event {
    match request {
        Request::GameState => Event::GameStateLoaded(get_game_state().await),
        Request::Click(coords) => Event::ClickReplied(post_click(coords).await),
        Request::Reset => Event::ResetReplied(post_reset().await),
        Request::SubmitScore(submission) => Event::ScoreSubmitted(post_score(&submission).await),
    }
}

async fn fetch<T: DeserializeOwned>(
    endpoint: Endpoint,
    body: Option<&ScoreSubmission>,
) -> Result<T> {
    let path = endpoint.path();
    log::debug!("{} {}", endpoint.method().as_str(), path);

    let sent = match (endpoint.method(), body) {
        (Method::Post, Some(body)) => HttpRequest::post(&path)
            .json(body)
            .map_err(network_error)?
            .send()
            .await,
        (Method::Post, None) => HttpRequest::post(&path).send().await,
        (Method::Get, _) => HttpRequest::get(&path).send().await,
    };
    let response = sent.map_err(network_error)?;
    decode(response).await
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await.map_err(network_error)?;
    log::trace!("reply {}: {}", status, body);

    if !response.ok() {
        return Err(ApiError::Status {
            status,
            detail: error_detail(&body),
        });
    }

    serde_json::from_str(&body).map_err(|err| ApiError::Decode {
        status,
        reason: err.to_string(),
    })
}

/// Message of a `{success, message}` error body, if the server sent one.
fn error_detail(body: &str) -> Option<String> {
    serde_json::from_str::<SubmitReply>(body)
        .ok()
        .map(|reply| reply.message)
        .filter(|message| !message.is_empty())
}

fn network_error(err: gloo::net::Error) -> ApiError {
    ApiError::Network(err.to_string())
}
