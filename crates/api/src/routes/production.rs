//! Route definitions for the production channel.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::production;
use crate::state::AppState;

/// Routes mounted at `/production`.
///
/// ```text
/// POST /cotton-bales                -> create_cotton_bale
/// POST /lots                        -> create_lot
/// GET  /lots/count?kind=            -> count_lots
/// PUT  /lots/{id}/owner             -> transfer_lot
/// POST /cotton-yarns                -> create_cotton_yarn
/// POST /unfinished-fabrics          -> create_unfinished_fabric
/// POST /finished-fabrics            -> create_finished_fabric
/// POST /cut-parts                   -> create_cut_part
/// POST /buttons                     -> create_button
/// POST /assembled-garments          -> create_assembled_garment
/// POST /cartons                     -> create_carton
/// PUT  /cartons/{id}/owner          -> transfer_carton
/// POST /containers                  -> create_container
/// POST /bills-of-lading             -> create_bill_of_lading
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cotton-bales", post(production::create_cotton_bale))
        .route("/lots", post(production::create_lot))
        .route("/lots/count", get(production::count_lots))
        .route("/lots/{id}/owner", put(production::transfer_lot))
        .route("/cotton-yarns", post(production::create_cotton_yarn))
        .route("/unfinished-fabrics", post(production::create_unfinished_fabric))
        .route("/finished-fabrics", post(production::create_finished_fabric))
        .route("/cut-parts", post(production::create_cut_part))
        .route("/buttons", post(production::create_button))
        .route("/assembled-garments", post(production::create_assembled_garment))
        .route("/cartons", post(production::create_carton))
        .route("/cartons/{id}/owner", put(production::transfer_carton))
        .route("/containers", post(production::create_container))
        .route("/bills-of-lading", post(production::create_bill_of_lading))
}
