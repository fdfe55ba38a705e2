//! Admin Handlers

pub(crate) mod get;
pub(crate) mod index;

#[cfg(test)]
pub(crate) mod tests {
    use jiff::Timestamp;

    use storefront_app::domain::{
        carts::models::{CartEntry, CartEntryUuid},
        catalog::ItemUuid,
        users::UserUuid,
    };

    pub(crate) fn make_entry(uuid: CartEntryUuid) -> CartEntry {
        CartEntry {
            uuid,
            user_uuid: UserUuid::new(),
            item_uuid: ItemUuid::new(),
            quantity: 2,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }
}
