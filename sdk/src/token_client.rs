// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::{
    api_types::{
        token::{
            CollectionData, CollectionsResource, Token, TokenData, TokenDataId, TokenId,
            TokenStoreResource,
        },
        AptosErrorCode,
    },
    rest_client::{Client as ApiClient, PendingTransaction, RestError},
    transaction_builder::{TransactionBuilder, TransactionFactory},
    types::{
        account_address::AccountAddress, chain_id::ChainId, transaction::TransactionPayload,
        LocalAccount,
    },
};
use anyhow::{Context, Result};
use aptos_cached_packages::aptos_token_sdk_builder::EntryFunctionCall;
use tracing::debug;

const COLLECTIONS_RESOURCE: &str = "0x3::token::Collections";
const TOKEN_STORE_RESOURCE: &str = "0x3::token::TokenStore";
const STRING_TYPE: &str = "0x1::string::String";
const COLLECTION_DATA_TYPE: &str = "0x3::token::CollectionData";
const TOKEN_DATA_ID_TYPE: &str = "0x3::token::TokenDataId";
const TOKEN_DATA_TYPE: &str = "0x3::token::TokenData";
const TOKEN_ID_TYPE: &str = "0x3::token::TokenId";
const TOKEN_TYPE: &str = "0x3::token::Token";

/// Client for the token v1 standard published at `0x3`.
#[derive(Clone, Debug)]
pub struct TokenClient<'a> {
    api_client: &'a ApiClient,
}

impl<'a> TokenClient<'a> {
    pub fn new(api_client: &'a ApiClient) -> Self {
        Self { api_client }
    }

    async fn get_chain_id(&self) -> Result<ChainId> {
        let id = self
            .api_client
            .get_index()
            .await
            .context("Failed to get chain ID")?
            .inner()
            .ledger_info
            .chain_id;

        Ok(ChainId::new(id))
    }

    async fn transaction_builder(
        &self,
        payload: TransactionPayload,
        options: Option<TransactionOptions>,
    ) -> Result<TransactionBuilder> {
        let options = options.unwrap_or_default();
        let factory = TransactionFactory::new(self.get_chain_id().await?)
            .with_gas_unit_price(options.gas_unit_price)
            .with_max_gas_amount(options.max_gas_amount)
            .with_transaction_expiration_time(options.timeout_secs);
        Ok(factory.payload(payload))
    }

    async fn sign_and_submit(
        &self,
        account: &mut LocalAccount,
        call: EntryFunctionCall,
        options: Option<TransactionOptions>,
    ) -> Result<PendingTransaction> {
        let builder = self.transaction_builder(call.encode()?, options).await?;
        let signed_txn = account.sign_with_transaction_builder(builder)?;

        debug!(
            sender = %account.address(),
            sequence_number = signed_txn.sequence_number(),
            "Submitting token transaction"
        );
        Ok(self
            .api_client
            .submit(&signed_txn)
            .await
            .context("Failed to submit token transaction")?
            .into_inner())
    }

    pub async fn create_collection(
        &self,
        account: &mut LocalAccount,
        name: &str,
        description: &str,
        uri: &str,
        max_amount: u64,
        options: Option<TransactionOptions>,
    ) -> Result<PendingTransaction> {
        let call = EntryFunctionCall::TokenCreateCollectionScript {
            name: name.to_owned().into_bytes(),
            description: description.to_owned().into_bytes(),
            uri: uri.to_owned().into_bytes(),
            maximum: max_amount,
            mutate_setting: vec![false, false, false],
        };
        self.sign_and_submit(account, call, options).await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_token(
        &self,
        account: &mut LocalAccount,
        collection_name: &str,
        name: &str,
        description: &str,
        supply: u64,
        uri: &str,
        max_amount: u64,
        royalty_options: Option<RoyaltyOptions>,
        options: Option<TransactionOptions>,
    ) -> Result<PendingTransaction> {
        // set default royalty options
        let royalty_options = match royalty_options {
            Some(opt) => opt,
            None => RoyaltyOptions {
                royalty_payee_address: account.address(),
                royalty_points_denominator: 0,
                royalty_points_numerator: 0,
            },
        };

        let call = EntryFunctionCall::TokenCreateTokenScript {
            collection: collection_name.to_owned().into_bytes(),
            name: name.to_owned().into_bytes(),
            description: description.to_owned().into_bytes(),
            balance: supply,
            maximum: max_amount,
            uri: uri.to_owned().into_bytes(),
            royalty_payee_address: royalty_options.royalty_payee_address,
            royalty_points_denominator: royalty_options.royalty_points_denominator,
            royalty_points_numerator: royalty_options.royalty_points_numerator,
            mutate_setting: vec![false, false, false, false, false],
            property_keys: vec![],
            property_values: vec![],
            property_types: vec![],
        };
        self.sign_and_submit(account, call, options).await
    }

    /// Escrow `amount` of a token held by `account` for `receiver` to claim.
    #[allow(clippy::too_many_arguments)]
    pub async fn offer_token(
        &self,
        account: &mut LocalAccount,
        receiver: AccountAddress,
        creator: AccountAddress,
        collection_name: &str,
        name: &str,
        amount: u64,
        property_version: u64,
        options: Option<TransactionOptions>,
    ) -> Result<PendingTransaction> {
        let call = EntryFunctionCall::TokenTransfersOfferScript {
            receiver,
            creator,
            collection: collection_name.to_owned().into_bytes(),
            name: name.to_owned().into_bytes(),
            property_version,
            amount,
        };
        self.sign_and_submit(account, call, options).await
    }

    /// Claim a token that `sender` offered to `account`.
    pub async fn claim_token(
        &self,
        account: &mut LocalAccount,
        sender: AccountAddress,
        creator: AccountAddress,
        collection_name: &str,
        name: &str,
        property_version: u64,
        options: Option<TransactionOptions>,
    ) -> Result<PendingTransaction> {
        let call = EntryFunctionCall::TokenTransfersClaimScript {
            sender,
            creator,
            collection: collection_name.to_owned().into_bytes(),
            name: name.to_owned().into_bytes(),
            property_version,
        };
        self.sign_and_submit(account, call, options).await
    }

    /// Withdraw an offer `account` made to `receiver` that hasn't been claimed yet.
    pub async fn cancel_token_offer(
        &self,
        account: &mut LocalAccount,
        receiver: AccountAddress,
        creator: AccountAddress,
        collection_name: &str,
        name: &str,
        property_version: u64,
        options: Option<TransactionOptions>,
    ) -> Result<PendingTransaction> {
        let call = EntryFunctionCall::TokenTransfersCancelOfferScript {
            receiver,
            creator,
            collection: collection_name.to_owned().into_bytes(),
            name: name.to_owned().into_bytes(),
            property_version,
        };
        self.sign_and_submit(account, call, options).await
    }

    /// Move a token from `sender` to `receiver` in a single multi-agent transaction that both
    /// accounts sign.
    #[allow(clippy::too_many_arguments)]
    pub async fn direct_transfer_token(
        &self,
        sender: &mut LocalAccount,
        receiver: &LocalAccount,
        creator: AccountAddress,
        collection_name: &str,
        name: &str,
        amount: u64,
        property_version: u64,
        options: Option<TransactionOptions>,
    ) -> Result<PendingTransaction> {
        let payload = EntryFunctionCall::TokenDirectTransferScript {
            creators_address: creator,
            collection: collection_name.to_owned().into_bytes(),
            name: name.to_owned().into_bytes(),
            property_version,
            amount,
        }
        .encode()?;
        let builder = self.transaction_builder(payload, options).await?;
        let signed_txn =
            sender.sign_multi_agent_with_transaction_builder(vec![receiver], builder)?;

        debug!(
            sender = %sender.address(),
            receiver = %receiver.address(),
            "Submitting multi-agent token transfer"
        );
        Ok(self
            .api_client
            .submit(&signed_txn)
            .await
            .context("Failed to submit multi-agent transfer transaction")?
            .into_inner())
    }

    async fn get_collections_resource(
        &self,
        creator: AccountAddress,
    ) -> Result<CollectionsResource> {
        let resource = self
            .api_client
            .get_account_resource(creator, COLLECTIONS_RESOURCE)
            .await
            .context("Failed to get collections resource")?
            .into_inner()
            .with_context(|| format!("Account {} has not created any collection", creator))?;
        Ok(serde_json::from_value(resource.data)?)
    }

    pub async fn get_collection_data(
        &self,
        creator: AccountAddress,
        collection_name: &str,
    ) -> Result<CollectionData> {
        let collections = self.get_collections_resource(creator).await?;
        let value = self
            .api_client
            .get_table_item(
                &collections.collection_data.handle,
                STRING_TYPE,
                COLLECTION_DATA_TYPE,
                collection_name,
            )
            .await
            .context("Failed to get collection data")?
            .into_inner();
        Ok(serde_json::from_value(value)?)
    }

    pub async fn get_token_data(
        &self,
        creator: AccountAddress,
        collection_name: &str,
        token_name: &str,
    ) -> Result<TokenData> {
        let collections = self.get_collections_resource(creator).await?;
        let value = self
            .api_client
            .get_table_item(
                &collections.token_data.handle,
                TOKEN_DATA_ID_TYPE,
                TOKEN_DATA_TYPE,
                TokenDataId::new(creator, collection_name, token_name),
            )
            .await
            .context("Failed to get token data")?
            .into_inner();
        Ok(serde_json::from_value(value)?)
    }

    /// The creator's own balance of a token.
    pub async fn get_token(
        &self,
        creator: AccountAddress,
        collection_name: &str,
        token_name: &str,
        property_version: u64,
    ) -> Result<Token> {
        let token_id = TokenId::new(
            TokenDataId::new(creator, collection_name, token_name),
            property_version,
        );
        self.get_token_for_account(creator, &token_id).await
    }

    /// The balance `account` holds of `token_id`. An account that never held the token gets
    /// an amount of zero rather than an error.
    pub async fn get_token_for_account(
        &self,
        account: AccountAddress,
        token_id: &TokenId,
    ) -> Result<Token> {
        let Some(resource) = self
            .api_client
            .get_account_resource(account, TOKEN_STORE_RESOURCE)
            .await
            .context("Failed to get token store")?
            .into_inner()
        else {
            return Ok(Token::empty(token_id.clone()));
        };
        let token_store: TokenStoreResource = serde_json::from_value(resource.data)?;

        match self
            .api_client
            .get_table_item(&token_store.tokens.handle, TOKEN_ID_TYPE, TOKEN_TYPE, token_id)
            .await
        {
            Ok(response) => Ok(serde_json::from_value::<Token>(response.into_inner())?),
            Err(RestError::Api(error))
                if error.error.error_code == AptosErrorCode::TableItemNotFound =>
            {
                Ok(Token::empty(token_id.clone()))
            },
            Err(err) => Err(err).context("Failed to get token"),
        }
    }
}

pub struct TransactionOptions {
    pub max_gas_amount: u64,

    pub gas_unit_price: u64,

    /// This is the number of seconds from now you're willing to wait for the
    /// transaction to be committed.
    pub timeout_secs: u64,
}

impl Default for TransactionOptions {
    fn default() -> Self {
        Self {
            max_gas_amount: 5_000,
            gas_unit_price: 100,
            timeout_secs: 10,
        }
    }
}

pub struct RoyaltyOptions {
    pub royalty_payee_address: AccountAddress,
    pub royalty_points_denominator: u64,
    pub royalty_points_numerator: u64,
}
