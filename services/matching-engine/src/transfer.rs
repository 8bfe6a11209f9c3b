//! Account-to-account transfers
//!
//! A transfer runs through the escrow: the amount is reserved on the sender,
//! spent from reserved, then credited to the receiver's available balance.

use types::errors::ClobResult;
use types::ids::AccountId;
use types::numeric::Amount;

use crate::batch::AccountBatch;

/// Move `amount` of `asset` from one staged account to another
///
/// Both accounts are modified as copies and put back only if every step
/// succeeded. A transfer to the sending account itself leaves it unchanged
/// once its funds check out.
pub fn transfer(
    batch: &mut AccountBatch,
    from: &AccountId,
    to: &AccountId,
    asset: &str,
    amount: Amount,
) -> ClobResult<()> {
    let mut sender = batch.get(from)?;
    sender.reserve(asset, amount)?;
    sender.use_reserved(asset, amount)?;

    if from == to {
        sender.credit(asset, amount)?;
        batch.put(sender);
        return Ok(());
    }

    let mut receiver = batch.get(to)?;
    receiver.credit(asset, amount)?;

    batch.put(sender);
    batch.put(receiver);
    Ok(())
}
