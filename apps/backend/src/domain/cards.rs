use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::domain::DomainError;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    pub fn as_str(&self) -> &'static str {
        match self {
            Suit::Clubs => "clubs",
            Suit::Diamonds => "diamonds",
            Suit::Hearts => "hearts",
            Suit::Spades => "spades",
        }
    }

    pub fn parse(s: &str) -> Result<Suit, DomainError> {
        match s {
            "clubs" => Ok(Suit::Clubs),
            "diamonds" => Ok(Suit::Diamonds),
            "hearts" => Ok(Suit::Hearts),
            "spades" => Ok(Suit::Spades),
            _ => Err(DomainError::parse_card(s)),
        }
    }
}

/// Sueca rank. The variants are declared in trick-strength order
/// (2 < 3 < 4 < 5 < 6 < Q < J < K < 7 < A) so the derived `Ord` is the
/// order that decides tricks. Point value is a separate lookup.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Queen,
    Jack,
    King,
    Seven,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 10] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Queen,
        Rank::Jack,
        Rank::King,
        Rank::Seven,
        Rank::Ace,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Queen => "Q",
            Rank::Jack => "J",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

// Note: Ord on Card is only for stable sorting: suit order C<D<H<S then
// trick-strength rank order. Trick resolution goes through card_beats, which
// also accounts for trump and lead.
impl Ord for Card {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.suit.cmp(&other.suit) {
            std::cmp::Ordering::Equal => self.rank.cmp(&other.rank),
            ord => ord,
        }
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Card {
    pub fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    /// Point value of the card: A=11, 7=10, K=4, J=3, Q=2, rest 0.
    /// Each suit carries 30 points, the deck 120.
    pub fn point_value(&self) -> u8 {
        match self.rank {
            Rank::Ace => 11,
            Rank::Seven => 10,
            Rank::King => 4,
            Rank::Jack => 3,
            Rank::Queen => 2,
            _ => 0,
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.suit.as_str(), self.rank.as_str())
    }
}

// Wire/storage encoding is "{suit}-{rank}", e.g. "hearts-A" or "clubs-2".
impl Serialize for Card {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_card_str(&s).map_err(|e| serde::de::Error::custom(e.to_string()))
    }
}

pub fn parse_card_str(s: &str) -> Result<Card, DomainError> {
    let Some((suit_tok, rank_tok)) = s.split_once('-') else {
        return Err(DomainError::parse_card(s));
    };
    let suit = Suit::parse(suit_tok)?;
    let rank = match rank_tok {
        "2" => Rank::Two,
        "3" => Rank::Three,
        "4" => Rank::Four,
        "5" => Rank::Five,
        "6" => Rank::Six,
        "7" => Rank::Seven,
        "Q" => Rank::Queen,
        "J" => Rank::Jack,
        "K" => Rank::King,
        "A" => Rank::Ace,
        _ => return Err(DomainError::parse_card(s)),
    };
    Ok(Card { suit, rank })
}

/// The 40-card Sueca deck in canonical order (suits C, D, H, S; ranks
/// ascending in trick strength within each suit).
pub fn deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(40);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            cards.push(Card { suit, rank });
        }
    }
    cards
}

pub fn hand_has_suit(hand: &[Card], suit: Suit) -> bool {
    hand.iter().any(|c| c.suit == suit)
}

/// Whether card `a` beats card `b` in a trick with the given lead and trump.
pub fn card_beats(a: Card, b: Card, lead: Suit, trump: Suit) -> bool {
    let a_trump = a.suit == trump;
    let b_trump = b.suit == trump;
    if a_trump && !b_trump {
        return true;
    }
    if b_trump && !a_trump {
        return false;
    }
    if a_trump && b_trump {
        return a.rank > b.rank;
    }
    // No trump involved: only cards following the lead can win
    let a_follows = a.suit == lead;
    let b_follows = b.suit == lead;
    if a_follows && !b_follows {
        return true;
    }
    if b_follows && !a_follows {
        return false;
    }
    if a_follows && b_follows {
        return a.rank > b.rank;
    }
    false
}

#[cfg(test)]
pub fn parse_cards(tokens: &[&str]) -> Vec<Card> {
    tokens
        .iter()
        .map(|s| parse_card_str(s).expect("valid card token"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_roundtrip() {
        let cases = [
            (Rank::Ace, Suit::Hearts, "hearts-A"),
            (Rank::Seven, Suit::Spades, "spades-7"),
            (Rank::Queen, Suit::Diamonds, "diamonds-Q"),
            (Rank::Two, Suit::Clubs, "clubs-2"),
        ];
        for (rank, suit, token) in cases {
            let c = Card { suit, rank };
            let s = serde_json::to_string(&c).unwrap();
            assert_eq!(s, format!("\"{token}\""));
            let decoded: Card = serde_json::from_str(&s).unwrap();
            assert_eq!(decoded, c);
        }
    }

    #[test]
    fn rejects_invalid_tokens() {
        for tok in [
            "hearts-8",
            "hearts-10",
            "hearts-T",
            "Hearts-A",
            "hearts",
            "hearts-",
            "-A",
            "",
            "heartsA",
        ] {
            assert!(parse_card_str(tok).is_err(), "accepted {tok:?}");
        }
    }

    #[test]
    fn deck_is_40_unique_cards_worth_120() {
        let d = deck();
        assert_eq!(d.len(), 40);
        let unique: std::collections::HashSet<_> = d.iter().copied().collect();
        assert_eq!(unique.len(), 40);
        let total: u32 = d.iter().map(|c| c.point_value() as u32).sum();
        assert_eq!(total, 120);
        for suit in Suit::ALL {
            let suit_total: u32 = d
                .iter()
                .filter(|c| c.suit == suit)
                .map(|c| c.point_value() as u32)
                .sum();
            assert_eq!(suit_total, 30);
        }
    }

    #[test]
    fn rank_order_is_trick_strength() {
        let strength = parse_cards(&[
            "clubs-2", "clubs-3", "clubs-4", "clubs-5", "clubs-6", "clubs-Q", "clubs-J",
            "clubs-K", "clubs-7", "clubs-A",
        ]);
        for pair in strength.windows(2) {
            assert!(pair[0].rank < pair[1].rank, "{} !< {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn card_beats_respects_trump_and_lead() {
        let lead = Suit::Hearts;
        let trump = Suit::Spades;
        let ah = parse_card_str("hearts-A").unwrap();
        let sh = parse_card_str("hearts-7").unwrap();
        let kh = parse_card_str("hearts-K").unwrap();
        let ts = parse_card_str("spades-2").unwrap();
        let td = parse_card_str("diamonds-A").unwrap();

        assert!(card_beats(ah, sh, lead, trump));
        assert!(card_beats(sh, kh, lead, trump));
        assert!(!card_beats(kh, ah, lead, trump));
        // Any trump beats any non-trump
        assert!(card_beats(ts, ah, lead, trump));
        // Off-suit, non-trump cards never win
        assert!(!card_beats(td, kh, lead, trump));
    }
}
