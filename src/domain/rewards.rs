//! View model for the trader rewards card.

use crate::time_utils::format_time_till;

/// Placeholder shown while an amount is still loading
pub const PENDING_AMOUNT: &str = "...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RewardsView {
    #[default]
    Personal,
    Leaderboard,
}

/// Lifetime totals for the connected account, ETH amounts in ETH
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UserRewards {
    pub total_trading_volume_usd: f64,
    pub total_rewards_eth: f64,
    pub unclaimed_rewards_eth: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WeekRewards {
    pub volume_usd: f64,
    pub reward_eth: f64,
    pub reward_usd: f64,
}

/// Everything the card needs, as delivered by the rewards page
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RewardsInputs {
    pub active: bool,
    pub account: Option<String>,
    pub ens_name: Option<String>,
    pub user: Option<UserRewards>,
    pub total_reward_usd: Option<f64>,
    pub unclaimed_rewards_usd: Option<f64>,
    pub week: Option<WeekRewards>,
    pub current_view: RewardsView,
    /// Epoch seconds of the next distribution
    pub next_rewards_at: Option<i64>,
    pub latest_week: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AccountBanner {
    Connected { address: Option<String>, title: String },
    Disconnected,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RewardsAction {
    ConnectWallet,
    /// Disabled button counting down to the end of the running week
    WeekEndsIn(String),
    ClaimEth,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RewardsSummary {
    pub hidden: bool,
    pub banner: AccountBanner,
    pub total_volume: String,
    pub total_rewards: String,
    pub unclaimed_rewards: String,
    pub week_volume: String,
    pub week_reward: String,
    pub week_reward_usd: String,
    pub countdown: Option<String>,
    pub action: RewardsAction,
}

/// Fixed decimals, optionally with thousands separators on the integer part.
pub fn format_amount(value: Option<f64>, decimals: usize, commas: bool) -> String {
    let Some(value) = value else {
        return PENDING_AMOUNT.to_string();
    };
    let raw = format!("{:.*}", decimals, value);
    if !commas {
        return raw;
    }
    let (sign, unsigned) = raw.strip_prefix('-').map_or(("", raw.as_str()), |rest| ("-", rest));
    let (int_part, frac_part) = unsigned.split_once('.').map_or((unsigned, None), |(i, f)| (i, Some(f)));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

/// `0x1234...abcd` style, `length` characters in total.
pub fn shorten_address(address: &str, length: usize) -> String {
    if length == 0 {
        return String::new();
    }
    let chars = address.chars().count();
    if chars < 10 || length < 4 {
        return address.to_string();
    }
    let left = (length - 3) / 2 + 1;
    let right = length.saturating_sub(left + 3);
    if left + right >= chars {
        return address.to_string();
    }
    let byte_at = |n: usize| address.char_indices().nth(n).map_or(address.len(), |(i, _)| i);
    format!("{}...{}", &address[..byte_at(left)], &address[byte_at(chars - right)..])
}

fn eth_with_usd(eth: Option<f64>, usd: Option<f64>) -> String {
    format!("{} ETH (${})", format_amount(eth, 4, true), format_amount(usd, 2, true))
}

pub fn summarize(inputs: &RewardsInputs, now_secs: i64) -> RewardsSummary {
    let countdown = inputs.next_rewards_at.and_then(|at| format_time_till(at, now_secs));

    let banner = if inputs.active {
        let title = match (&inputs.ens_name, &inputs.account) {
            (Some(ens), _) => ens.clone(),
            (None, Some(account)) => shorten_address(account, 13),
            (None, None) => String::new(),
        };
        AccountBanner::Connected { address: inputs.account.clone(), title }
    } else {
        AccountBanner::Disconnected
    };

    let action = match (inputs.active, inputs.latest_week) {
        (false, _) => RewardsAction::ConnectWallet,
        (true, true) => RewardsAction::WeekEndsIn(countdown.clone().unwrap_or_default()),
        (true, false) => RewardsAction::ClaimEth,
    };

    let user = inputs.user.as_ref();
    let week = inputs.week.as_ref();
    RewardsSummary {
        hidden: inputs.current_view == RewardsView::Leaderboard,
        banner,
        total_volume: format!("${}", format_amount(user.map(|u| u.total_trading_volume_usd), 2, true)),
        total_rewards: eth_with_usd(user.map(|u| u.total_rewards_eth), inputs.total_reward_usd),
        unclaimed_rewards: eth_with_usd(user.map(|u| u.unclaimed_rewards_eth), inputs.unclaimed_rewards_usd),
        week_volume: format!("${}", format_amount(week.map(|w| w.volume_usd), 2, true)),
        week_reward: format!("{} ETH", format_amount(week.map(|w| w.reward_eth), 4, true)),
        week_reward_usd: format!("(${})", format_amount(week.map(|w| w.reward_usd), 2, true)),
        countdown,
        action,
    }
}
