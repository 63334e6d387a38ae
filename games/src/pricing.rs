//! Exact price computation over saved lines.
//!
//! Pure functions of the committed lines and the game configuration. All
//! arithmetic is in integer cents ([`Money`]); the formatted currency string
//! is produced only at the cart boundary. The book holds dozens of lines at
//! most, so totals are recomputed on demand.

use crate::config::{AddOnBasis, GameConfig};
use crate::line::TicketLine;
use playslip_core::Money;

/// Price of one line under the game's pricing basis
///
/// - [`AddOnBasis::PerDraw`]: `(bet + add-on) * draws`
/// - [`AddOnBasis::PerLine`]: `bet * draws + add-on`
#[must_use]
pub fn line_price(line: &TicketLine, config: &GameConfig) -> Money {
    let add_on = if line.add_on {
        config.add_on_price
    } else {
        Money::ZERO
    };

    match config.add_on_basis {
        AddOnBasis::PerDraw => (line.bet_amount + add_on) * line.draw_count,
        AddOnBasis::PerLine => line.bet_amount * line.draw_count + add_on,
    }
}

/// Total price of a book of lines
#[must_use]
pub fn total_price(lines: &[TicketLine], config: &GameConfig) -> Money {
    lines.iter().map(|line| line_price(line, config)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GameConfig, PlayType};
    use crate::line::Slot;
    use proptest::prelude::*;

    fn straight_line(config: &GameConfig, digits: &[u8], bet: Money) -> TicketLine {
        let mut line = TicketLine::empty(config, PlayType::Straight, bet);
        for (slot, digit) in line.slots.iter_mut().zip(digits) {
            *slot = Slot::Filled(*digit);
        }
        line
    }

    #[test]
    fn straight_base_price() {
        let config = GameConfig::pick3();
        let line = straight_line(&config, &[4, 7, 2], Money::from_dollars(8));

        assert_eq!(line_price(&line, &config), Money::from_dollars(8));
    }

    #[test]
    fn add_on_and_draws_multiply_per_draw() {
        let config = GameConfig::pick3();
        let mut line = straight_line(&config, &[4, 7, 2], Money::from_dollars(8));
        line.add_on = true;
        line.draw_count = 2;

        // (8 + 1) * 2
        assert_eq!(line_price(&line, &config), Money::from_dollars(18));
    }

    #[test]
    fn per_line_basis_adds_flat_add_on() {
        let config = GameConfig::five_ball(69, 26);
        let mut line = TicketLine::empty(&config, PlayType::Straight, config.default_bet());
        line.add_on = true;
        line.draw_count = 3;

        // 2 * 3 + 1
        assert_eq!(line_price(&line, &config), Money::from_dollars(7));
    }

    #[test]
    fn total_is_sum_of_lines() {
        let config = GameConfig::pick3();
        let cheap = straight_line(&config, &[1, 2, 3], Money::from_cents(50));
        let mut dear = straight_line(&config, &[4, 5, 6], Money::from_dollars(1));
        dear.add_on = true;
        dear.draw_count = 7;

        let expected = line_price(&cheap, &config) + line_price(&dear, &config);
        assert_eq!(total_price(&[cheap, dear], &config), expected);
        assert_eq!(total_price(&[], &config), Money::ZERO);
    }

    fn arbitrary_line(config: GameConfig) -> impl Strategy<Value = TicketLine> {
        let bets = config.bet_menu.clone();
        let max_draws = config.max_draw_count;
        (
            0..bets.len(),
            any::<bool>(),
            1..=max_draws,
        )
            .prop_map(move |(bet_index, add_on, draw_count)| {
                let mut line =
                    TicketLine::empty(&config, PlayType::Straight, bets[bet_index]);
                line.add_on = add_on;
                line.draw_count = draw_count;
                line
            })
    }

    proptest! {
        #[test]
        fn total_is_linear(
            lines in proptest::collection::vec(arbitrary_line(GameConfig::pick3()), 0..12),
            split in 0usize..12,
        ) {
            let config = GameConfig::pick3();
            let split = split.min(lines.len());
            let (left, right) = lines.split_at(split);
            prop_assert_eq!(
                total_price(&lines, &config),
                total_price(left, &config) + total_price(right, &config)
            );
        }

        #[test]
        fn price_monotone_in_draws_and_add_on(line in arbitrary_line(GameConfig::pick3())) {
            let config = GameConfig::pick3();
            let base = line_price(&line, &config);

            let mut more_draws = line.clone();
            more_draws.draw_count += 1;
            prop_assert!(line_price(&more_draws, &config) >= base);

            let mut with_add_on = line.clone();
            with_add_on.add_on = true;
            prop_assert!(line_price(&with_add_on, &config) >= base);
        }

        #[test]
        fn per_line_basis_never_scales_add_on(line in arbitrary_line(GameConfig::five_ball(69, 26))) {
            let config = GameConfig::five_ball(69, 26);
            let mut without = line.clone();
            without.add_on = false;
            let delta = line_price(&line, &config).cents()
                - line_price(&without, &config).cents();
            let expected = if line.add_on { config.add_on_price.cents() } else { 0 };
            prop_assert_eq!(delta, expected);
        }
    }
}
