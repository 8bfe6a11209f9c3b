//! Trade settlement
//!
//! Moves escrowed funds between the two counterparties of a trade. The buyer
//! spends reserved quote and receives base; the seller spends reserved base
//! and receives quote. A buy taker that executed below its limit gets the
//! excess quote reservation released back to available.

use types::errors::ClobResult;
use types::ids::Instrument;
use types::numeric::{notional, Amount};
use types::order::{Order, Side};
use types::trade::Trade;

use crate::batch::AccountBatch;

/// Settle one trade against the staged accounts
///
/// All four ledger mutations apply to copies that are written back to the
/// batch only if every one of them succeeds.
pub fn settle_trade(
    batch: &mut AccountBatch,
    trade: &Trade,
    instrument: &Instrument,
    taker: &Order,
) -> ClobResult<()> {
    let (base, quote) = instrument.split();
    let quote_amount = trade.notional()?;
    let refund = price_improvement(trade, taker)?;

    let mut buyer = batch.get(&trade.buyer_account_id)?;
    buyer.use_reserved(quote, quote_amount)?;
    buyer.credit(base, trade.quantity)?;
    if refund > 0 {
        buyer.release_reserved(quote, refund)?;
    }

    if trade.is_self_trade() {
        buyer.use_reserved(base, trade.quantity)?;
        buyer.credit(quote, quote_amount)?;
        batch.put(buyer);
        return Ok(());
    }

    let mut seller = batch.get(&trade.seller_account_id)?;
    seller.use_reserved(base, trade.quantity)?;
    seller.credit(quote, quote_amount)?;

    batch.put(buyer);
    batch.put(seller);
    Ok(())
}

/// Quote reserved by a buy taker above the execution price
fn price_improvement(trade: &Trade, taker: &Order) -> ClobResult<Amount> {
    match taker.side {
        Side::BUY if taker.price > trade.price => {
            notional(taker.price - trade.price, trade.quantity)
        }
        _ => Ok(0),
    }
}
