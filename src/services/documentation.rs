use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for Pattern Quiz Back.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::sse::public_stream,
        crate::routes::sse::admin_stream,
        crate::routes::public::get_session,
        crate::routes::public::get_phase,
        crate::routes::public::get_scoreboard,
        crate::routes::public::get_history,
        crate::routes::public::list_examples,
        crate::routes::public::get_example,
        crate::routes::public::list_categories,
        crate::routes::admin::set_teams,
        crate::routes::admin::set_filters,
        crate::routes::admin::toggle_pause,
        crate::routes::admin::reset_session,
        crate::routes::admin::start_round,
        crate::routes::admin::reveal_solution,
        crate::routes::admin::award_point,
        crate::routes::admin::next_round,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::sse::Handshake,
            crate::dto::sse::AdminHandshake,
            crate::dto::phase::VisiblePhase,
            crate::dto::common::PhaseSnapshot,
            crate::dto::common::TeamSummary,
            crate::dto::common::TeamColorDto,
            crate::dto::session::SetTeamsRequest,
            crate::dto::session::SetFiltersRequest,
            crate::dto::session::StartRoundRequest,
            crate::dto::session::StartRoundResponse,
            crate::dto::session::AwardPointRequest,
            crate::dto::session::AwardPointResponse,
            crate::dto::session::SessionView,
            crate::dto::session::AnswerHistoryResponse,
            crate::dto::catalog::ExampleDetail,
            crate::dto::catalog::ExampleListResponse,
            crate::dto::catalog::CategoriesResponse,
            crate::catalog::Category,
            crate::catalog::CategoryFilter,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "sse", description = "Server-sent events streams"),
        (name = "public", description = "Read-only session and catalogue views"),
        (name = "admin", description = "Game-master operations driving the session"),
    )
)]
pub struct ApiDoc;
