//! Transaction ownership checks shared by every webhook.

use common::AppId;

use crate::events::{PlatformTransaction, TransactionCreator};
use crate::response::MalformedReason;

/// Returns the order's only transaction if this app installation created it.
///
/// Checks run in order and the first failure wins:
/// 1. at least one transaction exists
/// 2. no more than one transaction exists
/// 3. the transaction was created by an app
/// 4. that app is this installation
pub fn single_owned_transaction<'a>(
    transactions: &'a [PlatformTransaction],
    app_id: &AppId,
) -> Result<&'a PlatformTransaction, MalformedReason> {
    let transaction = match transactions {
        [] => return Err(MalformedReason::MissingTransactions),
        [single] => single,
        many => return Err(MalformedReason::MultipleTransactions(many.len())),
    };

    match &transaction.created_by {
        Some(TransactionCreator::App { id }) if id == app_id => Ok(transaction),
        Some(TransactionCreator::App { id }) => {
            tracing::warn!(
                psp_reference = %transaction.psp_reference,
                %app_id,
                created_by = %id,
                "transaction was created by a different app installation"
            );
            Err(MalformedReason::CreatedByOtherInstallation)
        }
        other => {
            tracing::warn!(
                psp_reference = %transaction.psp_reference,
                created_by = ?other,
                "transaction was not created by an app"
            );
            Err(MalformedReason::NotCreatedByApp)
        }
    }
}
