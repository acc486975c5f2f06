//! Side effects
//!
//! Carries out the service calls that `Requested` actions stand for and
//! feeds the outcome back through the reducer. Store mutations are applied
//! synchronously and followed by a fresh snapshot; device captures are
//! started here and answer later on the service handle's completion channel.

use libfixmycity::error::{AuthError, FixMyCityError};
use libfixmycity::service::validation::TextField;

use super::actions::{Action, Alert, Screen};
use super::reducer::reduce;
use super::state::AppState;
use crate::services::{validation_action, ServiceHandle};

/// Perform the side effects of an action that has already been reduced
pub fn perform(services: &ServiceHandle, state: AppState, action: &Action) -> AppState {
    let service = services.service();

    match action {
        Action::NavigateTo(Screen::CreateReport) => {
            services.request_permissions();
            state
        }

        Action::UpvoteRequested(id) => mutated(services, state, service.reports().upvote(*id)),
        Action::DownvoteRequested(id) => mutated(services, state, service.reports().downvote(*id)),

        Action::DescriptionChanged(content) => {
            let response = services.validate(TextField::Description, content);
            reduce(state, validation_action(response))
        }

        Action::PhotoRequested => {
            services.capture_photo(state.create.generation);
            state
        }

        Action::LocationRequested => {
            services.capture_location(state.create.generation);
            state
        }

        Action::SubmitRequested => match service.draft().submit(&state.create.draft) {
            Ok(report) => {
                let state = refresh(services, state);
                reduce(state, Action::ReportSubmitted(report.id))
            }
            Err(FixMyCityError::Validation(_)) => reduce(
                state,
                Action::ShowAlert(Alert::error(
                    "Add description",
                    "Please add a short description of the issue.",
                )),
            ),
            Err(e) => show_error(state, &e),
        },

        Action::CommentSubmitRequested(id) => {
            match service.reports().add_comment(*id, &state.detail.comment) {
                Ok(_) => {
                    let state = refresh(services, state);
                    reduce(state, Action::CommentAdded)
                }
                // An empty comment is ignored without a message
                Err(FixMyCityError::Validation(_)) => state,
                Err(e) => show_error(state, &e),
            }
        }

        Action::CommentUpvoteRequested { report_id, index } => mutated(
            services,
            state,
            service.reports().upvote_comment(*report_id, *index),
        ),

        Action::CommentDownvoteRequested { report_id, index } => mutated(
            services,
            state,
            service.reports().downvote_comment(*report_id, *index),
        ),

        Action::AdvanceStatusRequested(id) => {
            let result = match state.admin.as_ref() {
                Some(session) => service.reports().advance_status(*id, session),
                None => Err(AuthError::AdminRequired.into()),
            };
            match result {
                Ok(status) => {
                    let state = refresh(services, state);
                    reduce(state, Action::SetStatus(format!("Status changed to {}", status)))
                }
                Err(e) => show_error(state, &e),
            }
        }

        Action::LoginRequested => {
            match service
                .admin()
                .login(&state.login.username, &state.login.password)
            {
                Ok(session) => reduce(state, Action::LoginSucceeded(session)),
                Err(e) => show_error(state, &e),
            }
        }

        Action::LogoutRequested => {
            if let Some(session) = state.admin.clone() {
                service.admin().logout(session);
            }
            reduce(state, Action::LoggedOut)
        }

        _ => state,
    }
}

/// Re-read the store into state
pub fn refresh(services: &ServiceHandle, state: AppState) -> AppState {
    reduce(state, Action::ReportsLoaded(services.reports()))
}

fn mutated<T>(
    services: &ServiceHandle,
    state: AppState,
    result: libfixmycity::Result<T>,
) -> AppState {
    match result {
        Ok(_) => refresh(services, state),
        Err(e) => show_error(state, &e),
    }
}

fn show_error(state: AppState, error: &FixMyCityError) -> AppState {
    tracing::debug!(error = %error, "Showing error alert");
    reduce(state, Action::ShowAlert(Alert::from(error)))
}
