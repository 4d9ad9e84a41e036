//! Instantiate message builder and query labels for the CW20 token contract.

use cosmwasm_std::Uint128;
use cw20::{Cw20Coin, Cw20QueryMsg, Logo};
use cw20_base::msg::{InstantiateMarketingInfo, InstantiateMsg};

use crate::config::TokenConfig;

/// Build the init message for a token whose whole initial supply goes to
/// `holder`, who is also the marketing contact. No minter is set.
pub fn single_holder(token: &TokenConfig, holder: &str, amount: Uint128) -> InstantiateMsg {
    InstantiateMsg {
        name: token.name.clone(),
        symbol: token.symbol.clone(),
        decimals: token.decimals,
        initial_balances: vec![Cw20Coin {
            address: holder.to_string(),
            amount,
        }],
        mint: None,
        marketing: Some(InstantiateMarketingInfo {
            project: Some(token.project.clone()),
            description: Some(token.description.clone()),
            marketing: Some(holder.to_string()),
            logo: Some(Logo::Url(token.logo_url.clone())),
        }),
    }
}

/// Short name of a query, used in logs and errors.
pub fn query_kind(msg: &Cw20QueryMsg) -> &'static str {
    match msg {
        Cw20QueryMsg::TokenInfo {} => "token_info",
        Cw20QueryMsg::Minter {} => "minter",
        Cw20QueryMsg::Balance { .. } => "balance",
        _ => "other",
    }
}
