//! Cart total aggregation.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::domain::{
    carts::{errors::CartsServiceError, models::CartEntry},
    catalog::Catalog,
    users::UserUuid,
};

/// Decimal places totals are presented with.
pub(crate) const TOTAL_SCALE: u32 = 2;

/// Sum discounted line prices for a user's entries.
///
/// The discount rate is resolved once. Lines are summed exactly and the sum
/// is rounded once at the end, so the same entries always give the same
/// total. The result always carries exactly [`TOTAL_SCALE`] decimal places.
/// A line whose item has left the catalog fails the whole total.
pub(crate) async fn total_for(
    catalog: &dyn Catalog,
    user: UserUuid,
    entries: &[CartEntry],
) -> Result<Decimal, CartsServiceError> {
    if entries.is_empty() {
        return Ok(present(Decimal::ZERO));
    }

    let rate = catalog.discount_rate_of(user).await?;

    let mut total = Decimal::ZERO;

    for entry in entries {
        let unit = catalog.discounted_price(entry.item_uuid, rate).await?;

        let line = unit
            .checked_mul(Decimal::from(entry.quantity))
            .ok_or(CartsServiceError::QuantityOutOfRange)?;

        total = total
            .checked_add(line)
            .ok_or(CartsServiceError::QuantityOutOfRange)?;
    }

    debug!(%user, lines = entries.len(), %total, "cart total computed");

    Ok(present(total))
}

fn present(total: Decimal) -> Decimal {
    let mut rounded =
        total.round_dp_with_strategy(TOTAL_SCALE, RoundingStrategy::MidpointAwayFromZero);

    rounded.rescale(TOTAL_SCALE);

    rounded
}
