//! N8: division, with multiplication, addition and subtraction where a
//! scenario needs them.
//!
//! Scenario 1 is money; scenarios 2 and 3 are non-money, and every part
//! divides. Data tables appear only at 4 and 5 marks. Non-calculator
//! questions divide by one-digit divisors at 1 mark and two-digit
//! divisors from 2 marks; calculator questions use awkward decimals and
//! state the rounding they expect.

use crate::model::{AnswerPart, PaperMode};
use crate::numeric::{fmt, fmt_dp, fmt_no00, gcd, round_to};
use crate::rng::SeededRng;
use tracing::warn;

use super::{dec_dp, pick_hundredths, qtable2, REROLL_CAP};

pub(super) fn build(marks_total: u32, mode: PaperMode, rng: &mut SeededRng) -> Vec<AnswerPart> {
    let sc = rng.int(1, 3);
    let parts = if mode.is_calc() {
        calc(marks_total, sc, rng)
    } else {
        noncalc(marks_total, sc, rng)
    };
    parts.unwrap_or_else(|| {
        warn!(marks_total, "no division band for the requested marks; issuing the fallback drill");
        vec![AnswerPart::integer(
            "n8_f",
            "Work out: <b>84 ÷ 7</b>. <span class=\"endmark\">[1]</span>",
            1,
            12,
        )]
    })
}

/// One-digit divisors for the easiest non-calculator shares.
const ONE_DIGIT_DIVISORS: [i64; 7] = [3, 4, 5, 6, 7, 8, 9];

/// Two-digit divisors that still fall to short division comfortably.
const TWO_DIGIT_DIVISORS: [i64; 8] = [12, 15, 16, 18, 21, 24, 25, 28];

/// Named fractions a share can be cut by on the calculator paper.
const FRACTIONS: [(i64, i64, &str); 5] = [
    (1, 3, "one-third"),
    (1, 4, "one-quarter"),
    (3, 4, "three-quarters"),
    (1, 5, "one-fifth"),
    (2, 5, "two-fifths"),
];

/// Collects `n` distinct draws, topping up from `fill` if the draw
/// keeps repeating.
fn distinct(
    rng: &mut SeededRng,
    n: usize,
    fill: &[i64],
    mut draw: impl FnMut(&mut SeededRng) -> i64,
) -> Vec<i64> {
    let mut vals = Vec::with_capacity(n);
    let mut guard = 0;
    while vals.len() < n && guard < 200 {
        let v = draw(rng);
        if !vals.contains(&v) {
            vals.push(v);
        }
        guard += 1;
    }
    for &v in fill {
        if vals.len() < n && !vals.contains(&v) {
            vals.push(v);
        }
    }
    vals
}

// ------------------------- non-calculator -------------------------

fn noncalc(marks: u32, sc: i64, rng: &mut SeededRng) -> Option<Vec<AnswerPart>> {
    match marks {
        1 => Some(nc_one_mark(sc, rng)),
        2 => Some(nc_two_marks(sc, rng)),
        3 => Some(nc_three_marks(sc, rng)),
        4 => Some(nc_four_marks(sc, rng)),
        5 => Some(nc_five_marks(sc, rng)),
        _ => None,
    }
}

fn nc_one_mark(sc: i64, rng: &mut SeededRng) -> Vec<AnswerPart> {
    if sc == 1 {
        let people = *rng.choice(&ONE_DIGIT_DIVISORS);
        let each = rng.int(8, 30);
        let total = people * each;
        return vec![AnswerPart::money(
            "n8_1",
            format!("£{total} is shared equally between <b>{people}</b> people. How much does each person get? <span class=\"endmark\">[1]</span>"),
            1,
            each as f64,
        )];
    }
    if sc == 2 {
        let pieces = *rng.choice(&ONE_DIGIT_DIVISORS);
        let each = rng.int(6, 30);
        let total = pieces * each;
        return vec![AnswerPart::integer(
            "n8_1l",
            format!("A rope is <b>{total} cm</b> long. It is cut into <b>{pieces}</b> equal pieces. How long is each piece? <span class=\"endmark\">[1]</span>"),
            1,
            each,
        )];
    }

    let bowls = *rng.choice(&ONE_DIGIT_DIVISORS);
    let each = rng.int(40, 200);
    let total = bowls * each;
    vec![AnswerPart::integer(
        "n8_1m",
        format!("<b>{total} g</b> of pasta is shared equally into <b>{bowls}</b> bowls. How many grams are in each bowl? <span class=\"endmark\">[1]</span>"),
        1,
        each,
    )]
}

fn nc_two_marks(sc: i64, rng: &mut SeededRng) -> Vec<AnswerPart> {
    if sc == 1 {
        let people = *rng.choice(&TWO_DIGIT_DIVISORS);
        let each = rng.int(5, 30);
        let total = people * each;
        return vec![AnswerPart::money(
            "n8_2",
            format!("£{total} is shared equally between <b>{people}</b> people. How much does each person get? <span class=\"endmark\">[2]</span>"),
            2,
            each as f64,
        )];
    }
    if sc == 2 {
        let sections = *rng.choice(&TWO_DIGIT_DIVISORS);
        let each = rng.int(6, 40);
        let total = each * sections;
        return vec![AnswerPart::integer(
            "n8_2t",
            format!("A coach trip takes <b>{total}</b> minutes.<br>It is split into <b>{sections}</b> equal sections.<br>How long is <b>EACH</b> section? <span class=\"endmark\">[2]</span>"),
            2,
            each,
        )];
    }

    let bags = *rng.choice(&TWO_DIGIT_DIVISORS);
    let each = rng.int(6, 40);
    let total = each * bags;
    vec![AnswerPart::integer(
        "n8_2p",
        format!("<b>{total}</b> stickers are packed equally into <b>{bags}</b> bags.<br>How many stickers are in each bag? <span class=\"endmark\">[2]</span>"),
        2,
        each,
    )]
}

fn nc_three_marks(sc: i64, rng: &mut SeededRng) -> Vec<AnswerPart> {
    if sc == 1 {
        // one-digit division first, two-digit division second
        let people_a = *rng.choice(&ONE_DIGIT_DIVISORS);
        let people_b = *rng.choice(&TWO_DIGIT_DIVISORS);
        let each_b = rng.int(1, 12);
        let share = people_b * each_b;
        let total = share * people_a;

        return vec![
            AnswerPart::money(
                "n8_3a",
                format!("<b>(a)</b> <b>£{total}</b> is shared equally between <b>{people_a}</b> people. Work out how much each person gets. <span class=\"endmark\">[1]</span>"),
                1,
                share as f64,
            ),
            AnswerPart::money(
                "n8_3b",
                format!("<b>(b)</b> Each person then shares their money equally between <b>{people_b}</b> people.<br>Work out how much <b>EACH</b> person gets. <span class=\"endmark\">[2]</span>"),
                2,
                each_b as f64,
            ),
        ];
    }
    if sc == 2 {
        // pick laps and lap length so a whole-number speed with a
        // sensible ride time exists
        let (mut laps, mut lap_len, mut speed, mut hours_b) = (12, 8, 24, 4);
        let mut found = false;
        for _ in 0..200 {
            laps = *rng.choice(&TWO_DIGIT_DIVISORS);
            lap_len = rng.int(2, 12);
            let dist_b = laps * lap_len;

            let mut candidates = Vec::new();
            for s in 12..=30i64 {
                if dist_b % s == 0 {
                    let hb = dist_b / s;
                    if (2..=8).contains(&hb) {
                        candidates.push((s, hb));
                    }
                }
            }
            if !candidates.is_empty() {
                let &(s, hb) = rng.choice(&candidates);
                speed = s;
                hours_b = hb;
                found = true;
                break;
            }
        }
        if !found {
            laps = 12;
            lap_len = 8;
            speed = 24;
            hours_b = 4;
        }

        let hours_a = *rng.choice(&[4i64, 5, 6, 7, 8]);
        let dist_a = speed * hours_a;

        return vec![
            AnswerPart::integer(
                "n8_3d_a",
                format!("<b>(a)</b> A cyclist travels <b>{dist_a} km</b> in <b>{hours_a}</b> hours. Work out the average speed in km per hour. <span class=\"endmark\">[1]</span>"),
                1,
                speed,
            ),
            AnswerPart::integer(
                "n8_3d_b",
                format!("<b>(b)</b> The cyclist cycles for <b>{hours_b}</b> hours at the same speed.<br>The distance is shared equally over <b>{laps}</b> identical laps.<br>Work out the length of <b>EACH</b> lap. <span class=\"endmark\">[2]</span>"),
                2,
                lap_len,
            ),
        ];
    }

    let bowls = *rng.choice(&ONE_DIGIT_DIVISORS);
    let children = *rng.choice(&TWO_DIGIT_DIVISORS);
    let each_child = rng.int(1, 12);
    let each_bowl = each_child * children;
    let total = each_bowl * bowls;

    vec![
        AnswerPart::integer(
            "n8_3f_a",
            format!("<b>(a)</b> <b>{total}</b> strawberries are shared equally into <b>{bowls}</b> bowls. How many strawberries are in each bowl? <span class=\"endmark\">[1]</span>"),
            1,
            each_bowl,
        ),
        AnswerPart::integer(
            "n8_3f_b",
            format!("<b>(b)</b> Each bowl is then shared equally between <b>{children}</b> children.<br>How many strawberries does <b>EACH</b> child get? <span class=\"endmark\">[2]</span>"),
            2,
            each_child,
        ),
    ]
}

fn nc_four_marks(sc: i64, rng: &mut SeededRng) -> Vec<AnswerPart> {
    if sc == 1 {
        let ticket = rng.int(7, 15);
        let drink = rng.int(2, 6);
        let popcorn = rng.int(3, 7);
        let sweets = rng.int(2, 6);

        let people_share_a = 3;
        let people_share_b = 6;

        let names = ["Ticket", "Drink", "Popcorn", "Sweets"];
        let plurals = ["tickets", "drinks", "popcorns", "sweets"];
        let costs = [ticket, drink, popcorn, sweets];

        let order = rng.shuffle(&[0usize, 1, 2, 3]);
        let (share_i, spend_i) = (order[0], order[1]);

        let share_cost = 6 * costs[share_i];
        let each_a = share_cost / people_share_a;

        // build a budget so "as much as possible" on the spend item
        // leaves a remainder divisible by the final share
        let k = rng.int(8, 16);
        let options: Vec<i64> = (0..costs[spend_i])
            .filter(|r| r % people_share_b == 0)
            .collect();
        let non_zero: Vec<i64> = options.iter().copied().filter(|&r| r != 0).collect();
        let rem = if non_zero.is_empty() {
            *rng.choice(&options)
        } else {
            *rng.choice(&non_zero)
        };

        let budget = share_cost + costs[spend_i] * k + rem;
        let each_b = rem / people_share_b;

        let table = qtable2(
            ["Item", "Cost"],
            &names
                .iter()
                .zip(costs)
                .map(|(&n, c)| (n, format!("£{c}")))
                .collect::<Vec<_>>(),
        );

        return vec![
            AnswerPart::money(
                "n8_4a",
                format!("A group has <b>£{budget}</b> to spend. Prices are shown below.{table}<br><b>(a)</b> The group buys <b>6</b> {} and shares the cost equally between <b>{people_share_a}</b> people.<br>Work out how much <b>EACH</b> person pays. <span class=\"endmark\">[1]</span>", plurals[share_i]),
                1,
                each_a as f64,
            ),
            AnswerPart::money(
                "n8_4b",
                format!("<b>(b)</b> The group then spends as much of the remaining money as possible on {}.<br>The money left after buying the {} is shared equally between <b>{people_share_b}</b> people.<br>Work out how much <b>EACH</b> person gets. <span class=\"endmark\">[3]</span>", plurals[spend_i], plurals[spend_i]),
                3,
                each_b as f64,
            ),
        ];
    }
    if sc == 2 {
        // increasing whole-number masses
        let small = *rng.choice(&[1i64, 2, 3]);
        let medium = small + *rng.choice(&[1i64, 1, 2]);
        let large = medium + *rng.choice(&[1i64, 1, 2]);
        let xlarge = large + *rng.choice(&[1i64, 1, 2]);

        let groups = *rng.choice(&[4i64, 5, 6, 7, 8]);
        let each_kg = rng.int(2, 8);
        let total_kg = each_kg * groups;

        let bag_labels = ["extra large", "large", "medium", "small"];
        let bag_masses = [xlarge, large, medium, small];
        let order = rng.shuffle(&[0usize, 1, 2, 3]);
        let (b1_i, b2_i) = (order[0], order[1]);

        let mut b1 = rng.int(2, 10);
        let mut b2 = rng.int(2, 10);
        let mut guard = 0;
        while (b1 + b2) % 4 != 0 && guard < REROLL_CAP {
            b1 = rng.int(2, 10);
            b2 = rng.int(2, 10);
            guard += 1;
        }
        if (b1 + b2) % 4 != 0 {
            b1 = 2;
            b2 = 2;
        }

        let req1 = (b1 - 1) * bag_masses[b1_i] + rng.int(1, bag_masses[b1_i]);
        let req2 = (b2 - 1) * bag_masses[b2_i] + rng.int(1, bag_masses[b2_i]);
        let ans_bags = (b1 + b2) / 4;

        let table = qtable2(
            ["Bag size", "Mass per bag (kg)"],
            &[
                ("Extra large", xlarge.to_string()),
                ("Large", large.to_string()),
                ("Medium", medium.to_string()),
                ("Small", small.to_string()),
            ],
        );

        return vec![
            AnswerPart::integer(
                "n8_4p_a",
                format!("Compost is sold in bags. The mass of each bag is shown.{table}<br><b>(a)</b> <b>{total_kg} kg</b> of compost is shared equally between <b>{groups}</b> groups.<br>Work out the mass <b>EACH</b> group gets. <span class=\"endmark\">[1]</span>"),
                1,
                each_kg,
            ),
            AnswerPart::integer(
                "n8_4p_b",
                format!("<b>(b)</b> A garden needs <b>{req1} kg</b> of compost in {} bags and <b>{req2} kg</b> in {} bags.<br>Bags must be bought as whole bags.<br>The <b>TOTAL</b> number of bags bought is shared equally between <b>4</b> gardeners.<br>Work out how many bags <b>EACH</b> gardener receives. <span class=\"endmark\">[3]</span>", bag_labels[b1_i], bag_labels[b2_i]),
                3,
                ans_bags,
            ),
        ];
    }

    let city = rng.int(5, 9);
    let motorway = rng.int(10, 14);
    let rural = rng.int(7, 11);
    let short = rng.int(4, 7);

    let labels = ["City", "Motorway", "Rural", "Short"];
    let words = ["city", "motorway", "rural", "short"];
    let fuels = [city, motorway, rural, short];

    let a = *rng.choice(&[0usize, 1, 2, 3]);
    let trips_a = rng.int(4, 10);
    let used_a = trips_a * fuels[a];

    // part (b) burns the fuel left after two fixed trip types
    let rest: Vec<usize> = (0..4).filter(|&i| i != a).collect();
    let b = *rng.choice(&rest);
    let others: Vec<usize> = (0..4).filter(|&i| i != b).collect();
    let fixed = rng.shuffle(&others);
    let (f1, f2) = (fixed[0], fixed[1]);
    let fixed_count1 = 5;
    let fixed_count2 = 3;

    let trips_b = rng.int(6, 16);
    let total_fuel = fixed_count1 * fuels[f1] + fixed_count2 * fuels[f2] + trips_b * fuels[b];

    let table = qtable2(
        ["Trip type", "Fuel used (litres)"],
        &labels
            .iter()
            .zip(fuels)
            .map(|(&l, f)| (l, f.to_string()))
            .collect::<Vec<_>>(),
    );

    vec![
        AnswerPart::integer(
            "n8_4f_a",
            format!("Fuel used per trip is shown.{table}<br><b>(a)</b> <b>{used_a}</b> litres of fuel are used on {} trips only.<br>How many {} trips is that? <span class=\"endmark\">[1]</span>", words[a], words[a]),
            1,
            trips_a,
        ),
        AnswerPart::integer(
            "n8_4f_b",
            format!("<b>(b)</b> A driver has <b>{total_fuel}</b> litres of fuel available for the day.<br>They make <b>{fixed_count1}</b> {} trips and <b>{fixed_count2}</b> {} trips.<br>The fuel left is used for {} trips only.<br>Work out how many {} trips can be made. <span class=\"endmark\">[3]</span>", words[f1], words[f2], words[b], words[b]),
            3,
            trips_b,
        ),
    ]
}

fn nc_five_marks(sc: i64, rng: &mut SeededRng) -> Vec<AnswerPart> {
    if sc == 1 {
        let pay = 200;

        let names = ["Meal", "Drink", "Dessert", "Side"];
        let plurals = ["meals", "drinks", "desserts", "sides"];

        let (mut meal, mut drink, mut dessert, mut side) = (0i64, 0, 0, 0);
        let (mut a_i, mut b_i1, mut b_i2) = (0usize, 0, 0);
        let (mut q_b1, mut q_b2) = (0i64, 0);
        let mut change = 0i64;
        let mut guard = 0;
        loop {
            meal = rng.int(10, 18);
            drink = rng.int(2, 6);
            dessert = rng.int(3, 8);
            side = rng.int(2, 6);
            let costs = [meal, drink, dessert, side];

            let chosen = rng.shuffle(&[0usize, 1, 2, 3]);
            a_i = chosen[0];

            let b_pair = rng.shuffle(&chosen[1..3]);
            let qty_assign = rng.shuffle(&[6i64, 3]);
            b_i1 = b_pair[0];
            q_b1 = qty_assign[0];
            b_i2 = b_pair[1];
            q_b2 = qty_assign[1];

            let total_cost = 8 * costs[a_i] + q_b1 * costs[b_i1] + q_b2 * costs[b_i2];
            change = pay - total_cost;

            guard += 1;
            if (change > 0 && change % 5 == 0) || guard >= 500 {
                break;
            }
        }

        let costs = [meal, drink, dessert, side];
        let each_pays = (8 * costs[a_i]) as f64 / 4.0;
        let each_gets = change as f64 / 5.0;

        let table = qtable2(
            ["Item", "Cost"],
            &names
                .iter()
                .zip(costs)
                .map(|(&n, c)| (n, format!("£{c}")))
                .collect::<Vec<_>>(),
        );

        return vec![
            AnswerPart::money(
                "n8_5m_a",
                format!("A café has a menu.{table}<br><b>(a)</b> A group buys <b>8</b> {}.<br>They share the cost equally between <b>4</b> people.<br>Work out how much <b>EACH</b> person pays. <span class=\"endmark\">[2]</span>", plurals[a_i]),
                2,
                each_pays,
            ),
            AnswerPart::money(
                "n8_5m_b",
                format!("<b>(b)</b> The group also buys <b>{q_b1}</b> {} and <b>{q_b2}</b> {}.<br>They pay with <b>£{pay}</b>.<br>The change is shared equally between <b>5</b> people.<br>Work out how much <b>EACH</b> person gets. <span class=\"endmark\">[3]</span>", plurals[b_i1], plurals[b_i2]),
                3,
                each_gets,
            ),
        ];
    }
    if sc == 2 {
        if rng.float() < 0.5 {
            return nc_compost_staged(rng);
        }
        return nc_volume_share(rng);
    }
    nc_staffing_split(rng)
}

fn nc_compost_staged(rng: &mut SeededRng) -> Vec<AnswerPart> {
    let gardeners = 4;

    // one bag size stays single-digit, one stays two-digit
    let small = *rng.choice(&[4i64, 5, 6, 7, 8]);
    let medium = rng.int(small + 1, 9);
    let large = *rng.choice(&[12i64, 13, 14, 15, 16, 18]);
    let xlarge = large + *rng.choice(&[2i64, 3, 4, 5]);

    let &(bag_a_label, bag_a_mass) = rng.choice(&[("large", large), ("extra large", xlarge)]);
    let &(bag_b_label, bag_b_mass) = rng.choice(&[("small", small), ("medium", medium)]);

    let mut n_a = rng.int(3, 9);
    let mut n_b = rng.int(2, 9);
    let mut total_mass = n_a * bag_a_mass + n_b * bag_b_mass;
    let mut guard = 0;
    while total_mass % gardeners != 0 && guard < 250 {
        n_a = rng.int(3, 9);
        n_b = rng.int(2, 9);
        total_mass = n_a * bag_a_mass + n_b * bag_b_mass;
        guard += 1;
    }

    let req_a = n_a * bag_a_mass;
    let req_b = n_b * bag_b_mass;
    let each_gets = total_mass / gardeners;

    let table = qtable2(
        ["Bag size", "Mass (kg)"],
        &[
            ("Small", small.to_string()),
            ("Medium", medium.to_string()),
            ("Large", large.to_string()),
            ("Extra large", xlarge.to_string()),
        ],
    );

    vec![
        AnswerPart::integer(
            "n8_comp5_a",
            format!("Compost is sold in bags. The mass of each bag is shown.{table}<br><b>(a)</b> A garden needs <b>{req_a} kg</b> of compost in <b>{bag_a_label}</b> bags. Bags must be bought as whole bags.<br>Work out how many <b>{bag_a_label}</b> bags are needed. <span class=\"endmark\">[2]</span>"),
            2,
            n_a,
        ),
        AnswerPart::integer(
            "n8_comp5_b",
            format!("<b>(b)</b> The garden also needs <b>{req_b} kg</b> of compost in <b>{bag_b_label}</b> bags. Bags must be bought as whole bags.<br>Work out how many <b>{bag_b_label}</b> bags are needed. <span class=\"endmark\">[1]</span>"),
            1,
            n_b,
        ),
        AnswerPart::integer(
            "n8_comp5_c",
            "<b>(c)</b> Work out the total mass of compost that will be bought (in kg). <span class=\"endmark\">[1]</span>",
            1,
            total_mass,
        ),
        AnswerPart::integer(
            "n8_comp5_d",
            format!("<b>(d)</b> The total mass of compost is shared equally between <b>{gardeners}</b> gardeners.<br>Work out the mass of compost each gardener gets (in kg). <span class=\"endmark\">[1]</span>"),
            1,
            each_gets,
        ),
    ]
}

fn nc_volume_share(rng: &mut SeededRng) -> Vec<AnswerPart> {
    let jugs = *rng.choice(&[8i64, 9, 12]);
    let cups = *rng.choice(&[5i64, 6, 7, 8, 9]);

    // whole volumes, shuffled so any container can be the smallest
    let vols = distinct(rng, 4, &[3, 4, 5, 6], |r| r.int(3, 15));
    let vols = rng.shuffle(&vols);
    let names = ["Container A", "Container B", "Container C", "Container D"];

    let v_min = vols.iter().copied().min().unwrap_or(3);

    // the full-container count is a multiple of jugs × cups over the
    // shared factor, so part (b) lands on a whole number
    let denom = jugs * cups;
    let step = denom / gcd(v_min, denom);
    let full_count = rng.int(6, 14) * step;
    let remainder = rng.int(0, v_min - 1);
    let total_water = full_count * v_min + remainder;

    let used_water = full_count * v_min;
    let each_cup = (used_water / denom) as f64;

    let table = qtable2(
        ["Container type", "Volume (litres)"],
        &names
            .iter()
            .zip(&vols)
            .map(|(&n, &v)| (n, v.to_string()))
            .collect::<Vec<_>>(),
    );

    vec![
        AnswerPart::pair(
            "n8_5v_a",
            format!("Drinks are supplied in containers.{table}<br><b>(a)</b> A sports day has <b>{total_water}</b> litres of water.<br>They pour the water into the smallest volume container.<br>Work out how many <b>FULL</b> containers they can fill and how many litres are left over. <span class=\"endmark\">[2]</span>"),
            2,
            [full_count as f64, remainder as f64],
            ["containers", "litres left over"],
        ),
        AnswerPart::number(
            "n8_5v_b",
            format!("<b>(b)</b> Only the water in the <b>FULL</b> containers is used for drinks.<br>This water is shared equally into <b>{jugs}</b> jugs.<br>Then each jug is poured equally into <b>{cups}</b> cups.<br>Work out the volume of water in <b>EACH</b> cup. <span class=\"endmark\">[3]</span>"),
            3,
            each_cup,
        ),
    ]
}

fn nc_staffing_split(rng: &mut SeededRng) -> Vec<AnswerPart> {
    let staff = 7;

    let rows = ["Swimming", "Fitness class", "Yoga", "Badminton"];
    let plurals = [
        "swimming sessions",
        "fitness classes",
        "yoga sessions",
        "badminton sessions",
    ];
    let opts: [&[i64]; 4] = [
        &[40, 45, 50, 55],
        &[55, 60, 65],
        &[35, 38, 42, 45],
        &[45, 50, 55],
    ];

    // session types and counts for part (b)
    let b_keys = rng.shuffle(&[0usize, 1, 2, 3]);
    let counts = rng.shuffle(&[8i64, 6]);
    let (bk1, bk2) = (b_keys[0], b_keys[1]);
    let (c1, c2) = (counts[0], counts[1]);

    let mut mins = [0i64; 4];
    for (slot, opt) in mins.iter_mut().zip(opts) {
        *slot = *rng.choice(opt);
    }

    // retune the two part (b) durations until the total splits over the staff
    let mut total_time = c1 * mins[bk1] + c2 * mins[bk2];
    let mut guard = 0;
    while total_time % staff != 0 && guard < 600 {
        mins[bk1] = *rng.choice(opts[bk1]);
        mins[bk2] = *rng.choice(opts[bk2]);
        total_time = c1 * mins[bk1] + c2 * mins[bk2];
        guard += 1;
    }
    let each_staff = total_time / staff;

    let a_key = *rng.choice(&[0usize, 1, 2, 3]);
    let a_sessions = rng.int(5, 10);
    let a_mins = mins[a_key];
    let remainder = rng.int(0, a_mins - 1);
    let available = a_mins * a_sessions + remainder;

    let table = qtable2(
        ["Session type", "Minutes per session"],
        &rows
            .iter()
            .zip(mins)
            .map(|(&r, m)| (r, m.to_string()))
            .collect::<Vec<_>>(),
    );

    vec![
        AnswerPart::integer(
            "n8_5s_a",
            format!("A leisure centre runs sessions.{table}<br><b>(a)</b> A coach has <b>{available}</b> minutes available.<br>How many whole {} can be run? <span class=\"endmark\">[2]</span>", plurals[a_key]),
            2,
            a_sessions,
        ),
        AnswerPart::integer(
            "n8_5s_b",
            format!("<b>(b)</b> In one day the centre runs <b>{c1}</b> {} and <b>{c2}</b> {}.<br>The <b>TOTAL</b> session time is shared equally between <b>{staff}</b> staff to supervise.<br>Work out how many minutes <b>EACH</b> staff member supervises. <span class=\"endmark\">[3]</span>", plurals[bk1], plurals[bk2]),
            3,
            each_staff,
        ),
    ]
}

// --------------------------- calculator ---------------------------

fn calc(marks: u32, sc: i64, rng: &mut SeededRng) -> Option<Vec<AnswerPart>> {
    match marks {
        1 => Some(calc_one_mark(sc, rng)),
        2 => Some(calc_two_marks(sc, rng)),
        3 => Some(calc_three_marks(sc, rng)),
        4 => Some(calc_four_marks(sc, rng)),
        5 => Some(calc_five_marks(sc, rng)),
        _ => None,
    }
}

fn calc_one_mark(sc: i64, rng: &mut SeededRng) -> Vec<AnswerPart> {
    if sc == 1 {
        let people = *rng.choice(&[3i64, 4, 5, 6, 7, 8, 9, 12]);
        let each_p = pick_hundredths(rng, 600, 3500);
        let total_p = each_p * people;
        return vec![AnswerPart::money(
            "n8_1c",
            format!("£{} is shared equally between <b>{people}</b> people. How much does each person get? Give your answer to <b>2</b> decimal places. <span class=\"endmark\">[1]</span>", fmt_no00(total_p as f64 / 100.0, 2)),
            1,
            round_to(each_p as f64 / 100.0, 2),
        )];
    }
    if sc == 2 {
        let pieces = *rng.choice(&[4i64, 5, 6, 8, 9, 12]);
        let mut each_c = rng.int(50, 350);
        if each_c % 100 == 0 {
            each_c += 15;
        }
        let total_c = each_c * pieces;
        return vec![AnswerPart::number(
            "n8_1lc",
            format!("A rope is <b>{} m</b> long. It is cut into <b>{pieces}</b> equal pieces. How long is each piece? Give your answer to <b>2</b> decimal places. <span class=\"endmark\">[1]</span>", fmt_no00(total_c as f64 / 100.0, 2)),
            1,
            round_to(each_c as f64 / 100.0, 2),
        )];
    }

    let containers = *rng.choice(&[4i64, 5, 6, 8, 9, 12]);
    let mut each_c = rng.int(20, 250);
    if each_c % 100 == 0 {
        each_c += 7;
    }
    let total_c = each_c * containers;
    vec![AnswerPart::number(
        "n8_1mc",
        format!("<b>{} kg</b> of rice is shared equally into <b>{containers}</b> containers. How many kilograms are in each container? Give your answer to <b>2</b> decimal places. <span class=\"endmark\">[1]</span>", fmt_no00(total_c as f64 / 100.0, 2)),
        1,
        round_to(each_c as f64 / 100.0, 2),
    )]
}

fn calc_two_marks(sc: i64, rng: &mut SeededRng) -> Vec<AnswerPart> {
    if sc == 1 {
        let people = *rng.choice(&[6i64, 7, 8, 9, 12]);
        let share_p = pick_hundredths(rng, 900, 5000);
        let spend_p = pick_hundredths(rng, 100, 2500.min(share_p - 1));
        let total_p = share_p * people;
        let left_p = share_p - spend_p;
        return vec![AnswerPart::money(
            "n8_2c",
            format!("£{} is shared equally between <b>{people}</b> people.<br>Each person then spends <b>£{}</b>.<br>How much money does each person have left? Give your answer to <b>2</b> decimal places. <span class=\"endmark\">[2]</span>", fmt_no00(total_p as f64 / 100.0, 2), fmt_no00(spend_p as f64 / 100.0, 2)),
            2,
            round_to(left_p as f64 / 100.0, 2),
        )];
    }
    if sc == 2 {
        let sections = *rng.choice(&[4i64, 5, 6, 8, 9, 12]);
        let mut base_t = rng.int(150, 600);
        if base_t % 10 == 0 {
            base_t += 3;
        }
        let base = base_t as f64 / 10.0;
        let total = base * sections as f64;
        let mut brk_c = rng.int(25, 525);
        if brk_c % 100 == 0 {
            brk_c += 11;
        }
        let brk = brk_c as f64 / 100.0;
        let ans = round_to(base + brk, 2);
        return vec![AnswerPart::number(
            "n8_2tc",
            format!("A coach trip takes <b>{}</b> minutes.<br>It is split into <b>{sections}</b> equal sections.<br>Then <b>{}</b> minutes is added to <b>EACH</b> section for a break.<br>How long is <b>EACH</b> section now? Give your answer to <b>2</b> decimal places. <span class=\"endmark\">[2]</span>", fmt(total, 2), fmt(brk, 2)),
            2,
            ans,
        )];
    }

    let bags = *rng.choice(&[4i64, 5, 6, 7, 8, 9, 12]);
    let people = *rng.choice(&[2i64, 3, 4, 5]);
    let mut each_c = rng.int(250, 2500);
    if each_c % 100 == 0 {
        each_c += 17;
    }
    let total_c = each_c * bags * people;
    vec![AnswerPart::number(
        "n8_2pc",
        format!("<b>{} g</b> of sweets are packed equally into <b>{bags}</b> bags.<br>Then each bag is shared equally between <b>{people}</b> people.<br>How many grams does each person get? Give your answer to <b>2</b> decimal places. <span class=\"endmark\">[2]</span>", fmt(total_c as f64 / 100.0, 2)),
        2,
        round_to(each_c as f64 / 100.0, 2),
    )]
}

fn calc_three_marks(sc: i64, rng: &mut SeededRng) -> Vec<AnswerPart> {
    if sc == 1 {
        let people = *rng.choice(&[6i64, 7, 8, 9, 12]);
        let &(frac_n, frac_d, frac_text) = rng.choice(&FRACTIONS);

        let mut share_p = pick_hundredths(rng, 800, 5000);
        let mut guard = 0;
        while share_p % frac_d != 0 && guard < REROLL_CAP {
            share_p = pick_hundredths(rng, 800, 5000);
            guard += 1;
        }
        if share_p % frac_d != 0 {
            share_p = 900 + frac_d;
        }
        let total_p = share_p * people;
        let charity_p = share_p * frac_n / frac_d;

        return vec![
            AnswerPart::money(
                "n8_3ac",
                format!("<b>(a)</b> <b>£{}</b> is shared equally between <b>{people}</b> people. Work out how much each person gets. Give your answer to <b>2</b> decimal places. <span class=\"endmark\">[1]</span>", fmt_no00(total_p as f64 / 100.0, 2)),
                1,
                round_to(share_p as f64 / 100.0, 2),
            ),
            AnswerPart::money(
                "n8_3bc",
                format!("<b>(b)</b> Each person gives <b>{frac_text}</b> of their share to charity.<br>Work out how much money each person gives. Give your answer to <b>2</b> decimal places. <span class=\"endmark\">[2]</span>"),
                2,
                round_to(charity_p as f64 / 100.0, 2),
            ),
        ];
    }
    if sc == 2 {
        let mut speed_t = rng.int(120, 320);
        if speed_t % 10 == 0 {
            speed_t += 3;
        }
        let speed = speed_t as f64 / 10.0;

        let hours_a = *rng.choice(&[5.5, 6.5, 7.5, 8.5]);
        let dist_a = round_to(speed * hours_a, 2);

        // one-decimal speed times a tenths ride time stays exact in
        // hundredths, so the lap length can divide evenly
        let (mut hours_b, mut laps, mut lap_len) = (3.6, 9, 0.0);
        let mut found = false;
        for _ in 0..200 {
            hours_b = *rng.choice(&[2.4, 2.8, 3.2, 3.6, 4.0, 4.5]);
            let dist_b_int = (speed * hours_b * 100.0).round() as i64;
            laps = *rng.choice(&[7i64, 8, 9, 12]);
            if dist_b_int % laps == 0 {
                lap_len = (dist_b_int / laps) as f64 / 100.0;
                found = true;
                break;
            }
        }
        if !found {
            hours_b = 3.6;
            laps = 9;
            let dist_b_int = (speed * hours_b * 100.0).round() as i64;
            lap_len = (dist_b_int / laps) as f64 / 100.0;
        }

        return vec![
            AnswerPart::number(
                "n8_3dc_a",
                format!("<b>(a)</b> A cyclist travels <b>{} km</b> in <b>{}</b> hours. Work out the average speed in km per hour. Give your answer to <b>2</b> decimal places. <span class=\"endmark\">[1]</span>", fmt(dist_a, 2), fmt(hours_a, 2)),
                1,
                round_to(speed, 2),
            ),
            AnswerPart::number(
                "n8_3dc_b",
                format!("<b>(b)</b> The cyclist cycles for <b>{}</b> hours at the same speed.<br>The distance is shared equally over <b>{laps}</b> identical laps.<br>Work out the length of <b>EACH</b> lap. Give your answer to <b>2</b> decimal places. <span class=\"endmark\">[2]</span>", fmt(hours_b, 2)),
                2,
                round_to(lap_len, 2),
            ),
        ];
    }

    let jugs = *rng.choice(&[6i64, 7, 8, 9]);
    let cups = *rng.choice(&[5i64, 6, 7, 8, 9]);
    let each_cup_c = rng.int(5, 50);
    let each_jug_c = each_cup_c * cups;
    let total_c = each_jug_c * jugs;

    vec![
        AnswerPart::number(
            "n8_3fc_a",
            format!("<b>(a)</b> <b>{} litres</b> of juice are shared equally into <b>{jugs}</b> jugs. How many litres are in each jug? Give your answer to <b>2</b> decimal places. <span class=\"endmark\">[1]</span>", fmt_no00(total_c as f64 / 100.0, 2)),
            1,
            round_to(each_jug_c as f64 / 100.0, 2),
        ),
        AnswerPart::number(
            "n8_3fc_b",
            format!("<b>(b)</b> Each jug is then poured equally into <b>{cups}</b> cups.<br>How many litres are in <b>EACH</b> cup? Give your answer to <b>2</b> decimal places. <span class=\"endmark\">[2]</span>"),
            2,
            round_to(each_cup_c as f64 / 100.0, 2),
        ),
    ]
}

fn calc_four_marks(sc: i64, rng: &mut SeededRng) -> Vec<AnswerPart> {
    if sc == 1 {
        let ticket_p = pick_hundredths(rng, 750, 1500);
        let drink_p = pick_hundredths(rng, 250, 700);
        let popcorn_p = pick_hundredths(rng, 300, 800);
        let sweets_p = pick_hundredths(rng, 200, 650);

        let people_share_a = 3;
        let people_share_b = 6;

        let names = ["Ticket", "Drink", "Popcorn", "Sweets"];
        let plurals = ["tickets", "drinks", "popcorns", "sweets"];
        let costs = [ticket_p, drink_p, popcorn_p, sweets_p];

        let order = rng.shuffle(&[0usize, 1, 2, 3]);
        let (share_i, spend_i) = (order[0], order[1]);

        let share_cost_p = 6 * costs[share_i];
        let each_a = round_to((share_cost_p as f64 / people_share_a as f64) / 100.0, 2);

        let k = rng.int(8, 16);
        let options: Vec<i64> = (0..costs[spend_i])
            .filter(|r| r % people_share_b == 0)
            .collect();
        let non_zero: Vec<i64> = options.iter().copied().filter(|&r| r != 0).collect();
        let rem_p = if non_zero.is_empty() {
            *rng.choice(&options)
        } else {
            *rng.choice(&non_zero)
        };

        let budget_p = share_cost_p + costs[spend_i] * k + rem_p;
        let each_b = round_to((rem_p as f64 / people_share_b as f64) / 100.0, 2);

        let table = qtable2(
            ["Item", "Cost"],
            &names
                .iter()
                .zip(costs)
                .map(|(&n, c)| (n, format!("£{}", fmt_dp(c as f64 / 100.0, 2))))
                .collect::<Vec<_>>(),
        );

        return vec![
            AnswerPart::money(
                "n8_4ac",
                format!("A group has <b>£{}</b> to spend. Prices are shown below.{table}<br><b>(a)</b> The group buys <b>6</b> {} and shares the cost equally between <b>{people_share_a}</b> people.<br>Work out how much <b>EACH</b> person pays. Give your answer to <b>2</b> decimal places. <span class=\"endmark\">[1]</span>", fmt_no00(budget_p as f64 / 100.0, 2), plurals[share_i]),
                1,
                each_a,
            ),
            AnswerPart::money(
                "n8_4bc",
                format!("<b>(b)</b> The group then spends as much of the remaining money as possible on {}.<br>The money left after buying the {} is shared equally between <b>{people_share_b}</b> people.<br>Work out how much <b>EACH</b> person gets. Give your answer to <b>2</b> decimal places. <span class=\"endmark\">[3]</span>", plurals[spend_i], plurals[spend_i]),
                3,
                each_b,
            ),
        ];
    }
    if sc == 2 {
        let masses = {
            let mut m = distinct(rng, 4, &[81, 82, 83, 84], |r| pick_hundredths(r, 80, 450));
            m.sort_unstable();
            m
        };
        let (small_c, medium_c, large_c, xlarge_c) = (masses[0], masses[1], masses[2], masses[3]);

        let groups = *rng.choice(&[4i64, 5, 6, 7, 8]);
        let mut each_c = rng.int(150, 650);
        if each_c % 100 == 0 {
            each_c += 13;
        }
        let total_c = each_c * groups;

        let bag_labels = ["extra large", "large", "medium", "small"];
        let bag_masses = [xlarge_c, large_c, medium_c, small_c];
        let order = rng.shuffle(&[0usize, 1, 2, 3]);
        let (b1_i, b2_i) = (order[0], order[1]);

        let mut b1 = rng.int(2, 10);
        let mut b2 = rng.int(2, 10);
        let mut guard = 0;
        while (b1 + b2) % 4 != 0 && guard < REROLL_CAP {
            b1 = rng.int(2, 10);
            b2 = rng.int(2, 10);
            guard += 1;
        }
        if (b1 + b2) % 4 != 0 {
            b1 = 2;
            b2 = 2;
        }

        let req1_c = (b1 - 1) * bag_masses[b1_i] + rng.int(1, bag_masses[b1_i]);
        let req2_c = (b2 - 1) * bag_masses[b2_i] + rng.int(1, bag_masses[b2_i]);
        let ans_bags = (b1 + b2) / 4;

        let table = qtable2(
            ["Bag size", "Mass per bag (kg)"],
            &[
                ("Extra large", fmt_dp(xlarge_c as f64 / 100.0, 2)),
                ("Large", fmt_dp(large_c as f64 / 100.0, 2)),
                ("Medium", fmt_dp(medium_c as f64 / 100.0, 2)),
                ("Small", fmt_dp(small_c as f64 / 100.0, 2)),
            ],
        );

        return vec![
            AnswerPart::number(
                "n8_4pc_a",
                format!("Compost is sold in bags. The mass of each bag is shown.{table}<br><b>(a)</b> <b>{} kg</b> of compost is shared equally between <b>{groups}</b> groups.<br>Work out the mass <b>EACH</b> group gets. Give your answer to <b>2</b> decimal places. <span class=\"endmark\">[1]</span>", fmt_no00(total_c as f64 / 100.0, 2)),
                1,
                round_to(each_c as f64 / 100.0, 2),
            ),
            AnswerPart::integer(
                "n8_4pc_b",
                format!("<b>(b)</b> A garden needs <b>{} kg</b> of compost in {} bags and <b>{} kg</b> in {} bags.<br>Bags must be bought as whole bags.<br>The <b>TOTAL</b> number of bags bought is shared equally between <b>4</b> gardeners.<br>Work out how many bags <b>EACH</b> gardener receives. <span class=\"endmark\">[3]</span>", fmt_no00(req1_c as f64 / 100.0, 2), bag_labels[b1_i], fmt_no00(req2_c as f64 / 100.0, 2), bag_labels[b2_i]),
                3,
                ans_bags,
            ),
        ];
    }

    let city_c = pick_hundredths(rng, 650, 900);
    let motorway_c = pick_hundredths(rng, 1050, 1500);
    let rural_c = pick_hundredths(rng, 750, 1250);
    let short_c = pick_hundredths(rng, 450, 850);

    let labels = ["City", "Motorway", "Rural", "Short"];
    let words = ["city", "motorway", "rural", "short"];
    let fuels = [city_c, motorway_c, rural_c, short_c];

    let a = *rng.choice(&[0usize, 1, 2, 3]);
    let trips_a = rng.int(4, 10);
    let used_a_c = trips_a * fuels[a];

    let rest: Vec<usize> = (0..4).filter(|&i| i != a).collect();
    let b = *rng.choice(&rest);
    let others: Vec<usize> = (0..4).filter(|&i| i != b).collect();
    let fixed = rng.shuffle(&others);
    let (f1, f2) = (fixed[0], fixed[1]);
    let fixed_count1 = 5;
    let fixed_count2 = 3;

    let trips_b = rng.int(6, 16);
    let total_fuel_c = fixed_count1 * fuels[f1] + fixed_count2 * fuels[f2] + trips_b * fuels[b];

    let table = qtable2(
        ["Trip type", "Fuel used (litres)"],
        &labels
            .iter()
            .zip(fuels)
            .map(|(&l, f)| (l, fmt_dp(f as f64 / 100.0, 2)))
            .collect::<Vec<_>>(),
    );

    vec![
        AnswerPart::integer(
            "n8_4fc_a",
            format!("Fuel used per trip is shown.{table}<br><b>(a)</b> <b>{}</b> litres of fuel are used on {} trips only.<br>How many {} trips is that? <span class=\"endmark\">[1]</span>", fmt_no00(used_a_c as f64 / 100.0, 2), words[a], words[a]),
            1,
            trips_a,
        ),
        AnswerPart::integer(
            "n8_4fc_b",
            format!("<b>(b)</b> A driver has <b>{}</b> litres of fuel available for the day.<br>They make <b>{fixed_count1}</b> {} trips and <b>{fixed_count2}</b> {} trips.<br>The fuel left is used for {} trips only.<br>Work out how many {} trips can be made. <span class=\"endmark\">[3]</span>", fmt_no00(total_fuel_c as f64 / 100.0, 2), words[f1], words[f2], words[b], words[b]),
            3,
            trips_b,
        ),
    ]
}

fn calc_five_marks(sc: i64, rng: &mut SeededRng) -> Vec<AnswerPart> {
    if sc == 1 {
        let pay_p = 20000;

        let names = ["Meal", "Drink", "Dessert", "Side"];
        let plurals = ["meals", "drinks", "desserts", "sides"];

        let (mut meal_p, mut drink_p, mut dessert_p, mut side_p) = (0i64, 0, 0, 0);
        let (mut a_i, mut b_i1, mut b_i2) = (0usize, 0, 0);
        let (mut q_b1, mut q_b2) = (0i64, 0);
        let mut change_p = 0i64;
        let mut guard = 0;
        loop {
            meal_p = pick_hundredths(rng, 1000, 1899);
            drink_p = pick_hundredths(rng, 200, 699);
            dessert_p = pick_hundredths(rng, 300, 899);
            side_p = pick_hundredths(rng, 200, 699);
            let costs = [meal_p, drink_p, dessert_p, side_p];

            let chosen = rng.shuffle(&[0usize, 1, 2, 3]);
            a_i = chosen[0];

            let b_pair = rng.shuffle(&chosen[1..3]);
            let qty_assign = rng.shuffle(&[6i64, 3]);
            b_i1 = b_pair[0];
            q_b1 = qty_assign[0];
            b_i2 = b_pair[1];
            q_b2 = qty_assign[1];

            let total_cost_p = 8 * costs[a_i] + q_b1 * costs[b_i1] + q_b2 * costs[b_i2];
            change_p = pay_p - total_cost_p;

            guard += 1;
            // change must split into five in whole pence
            if (change_p > 0 && change_p % 500 == 0) || guard >= 800 {
                break;
            }
        }

        let costs = [meal_p, drink_p, dessert_p, side_p];
        let each_pays = round_to(((8 * costs[a_i]) as f64 / 4.0) / 100.0, 2);
        let each_gets = round_to((change_p as f64 / 5.0) / 100.0, 2);

        let table = qtable2(
            ["Item", "Cost"],
            &names
                .iter()
                .zip(costs)
                .map(|(&n, c)| (n, format!("£{}", fmt_dp(c as f64 / 100.0, 2))))
                .collect::<Vec<_>>(),
        );

        return vec![
            AnswerPart::money(
                "n8_5mc_a",
                format!("A café has a menu.{table}<br><b>(a)</b> A group buys <b>8</b> {}.<br>They share the cost equally between <b>4</b> people.<br>Work out how much <b>EACH</b> person pays. Give your answer to <b>2</b> decimal places. <span class=\"endmark\">[2]</span>", plurals[a_i]),
                2,
                each_pays,
            ),
            AnswerPart::money(
                "n8_5mc_b",
                format!("<b>(b)</b> The group also buys <b>{q_b1}</b> {} and <b>{q_b2}</b> {}.<br>They pay with <b>£{}</b>.<br>The change is shared equally between <b>5</b> people.<br>Work out how much <b>EACH</b> person gets. Give your answer to <b>2</b> decimal places. <span class=\"endmark\">[3]</span>", plurals[b_i1], plurals[b_i2], fmt_dp(pay_p as f64 / 100.0, 2)),
                3,
                each_gets,
            ),
        ];
    }
    if sc == 2 {
        if rng.float() < 0.5 {
            return calc_compost_staged(rng);
        }
        return calc_volume_share(rng);
    }
    calc_staffing_split(rng)
}

fn calc_compost_staged(rng: &mut SeededRng) -> Vec<AnswerPart> {
    let gardeners = 4;

    let small = dec_dp(rng, 3.50, 8.90, 2);
    let medium = dec_dp(rng, small + 0.10, 9.90, 2);
    let large = dec_dp(rng, 11.50, 18.50, 2);
    let xlarge = dec_dp(rng, large + 0.50, large + 3.50, 2);

    let &(bag_a_label, bag_a_mass) = rng.choice(&[("large", large), ("extra large", xlarge)]);
    let &(bag_b_label, bag_b_mass) = rng.choice(&[("small", small), ("medium", medium)]);

    let n_a = rng.int(3, 9);
    let n_b = rng.int(2, 9);

    let req_a = round_to(n_a as f64 * bag_a_mass, 2);
    let req_b = round_to(n_b as f64 * bag_b_mass, 2);

    let total_raw = req_a + req_b;
    let total_mass = round_to(total_raw, 2);
    let each_gets = round_to(total_raw / gardeners as f64, 2);

    let table = qtable2(
        ["Bag size", "Mass (kg)"],
        &[
            ("Small", fmt_dp(small, 2)),
            ("Medium", fmt_dp(medium, 2)),
            ("Large", fmt_dp(large, 2)),
            ("Extra large", fmt_dp(xlarge, 2)),
        ],
    );

    vec![
        AnswerPart::integer(
            "n8_comp5c_a",
            format!("Compost is sold in bags. The mass of each bag is shown.{table}<br><b>(a)</b> A garden needs <b>{} kg</b> of compost in <b>{bag_a_label}</b> bags. Bags must be bought as whole bags.<br>Work out how many <b>{bag_a_label}</b> bags are needed. <span class=\"endmark\">[2]</span>", fmt_dp(req_a, 2)),
            2,
            n_a,
        ),
        AnswerPart::integer(
            "n8_comp5c_b",
            format!("<b>(b)</b> The garden also needs <b>{} kg</b> of compost in <b>{bag_b_label}</b> bags. Bags must be bought as whole bags.<br>Work out how many <b>{bag_b_label}</b> bags are needed. <span class=\"endmark\">[1]</span>", fmt_dp(req_b, 2)),
            1,
            n_b,
        ),
        AnswerPart::number(
            "n8_comp5c_c",
            "<b>(c)</b> Work out the total mass of compost that will be bought (in kg). Give your answer to <b>2</b> decimal places. <span class=\"endmark\">[1]</span>",
            1,
            total_mass,
        ),
        AnswerPart::number(
            "n8_comp5c_d",
            format!("<b>(d)</b> The total mass of compost is shared equally between <b>{gardeners}</b> gardeners.<br>Work out the mass of compost each gardener gets (in kg). Give your answer to <b>2</b> decimal places. <span class=\"endmark\">[1]</span>"),
            1,
            each_gets,
        ),
    ]
}

fn calc_volume_share(rng: &mut SeededRng) -> Vec<AnswerPart> {
    let jugs = *rng.choice(&[6i64, 7, 8, 9]);
    let cups = *rng.choice(&[6i64, 7, 8, 9]);

    // hundredths of litres, shuffled so any container can be the smallest
    let vols = distinct(rng, 4, &[251, 252, 253, 254], |r| {
        pick_hundredths(r, 250, 1400)
    });
    let vols = rng.shuffle(&vols);
    let names = ["Container A", "Container B", "Container C", "Container D"];

    let v_min = vols.iter().copied().min().unwrap_or(251);

    let denom = jugs * cups;
    let step = denom / gcd(v_min, denom);
    let full_count = rng.int(6, 14) * step;
    let remainder = rng.int(0, v_min - 1);
    let total_water = full_count * v_min + remainder;

    let used_water = full_count * v_min;
    let each_cup = round_to((used_water / denom) as f64 / 100.0, 2);
    let leftover = round_to(remainder as f64 / 100.0, 2);

    let table = qtable2(
        ["Container type", "Volume (litres)"],
        &names
            .iter()
            .zip(&vols)
            .map(|(&n, &v)| (n, fmt_dp(v as f64 / 100.0, 2)))
            .collect::<Vec<_>>(),
    );

    vec![
        AnswerPart::pair(
            "n8_5vc_a",
            format!("Drinks are supplied in containers.{table}<br><b>(a)</b> A sports day has <b>{}</b> litres of water.<br>They pour the water into the smallest volume container.<br>Work out how many <b>FULL</b> containers they can fill and how many litres are left over. Round any decimal answers to <b>2</b> decimal places. <span class=\"endmark\">[2]</span>", fmt_no00(total_water as f64 / 100.0, 2)),
            2,
            [full_count as f64, leftover],
            ["containers", "litres left over"],
        ),
        AnswerPart::number(
            "n8_5vc_b",
            format!("<b>(b)</b> Only the water in the <b>FULL</b> containers is used for drinks.<br>This water is shared equally into <b>{jugs}</b> jugs.<br>Then each jug is poured equally into <b>{cups}</b> cups.<br>Work out the volume of water in <b>EACH</b> cup. Give your answer to <b>2</b> decimal places. <span class=\"endmark\">[3]</span>"),
            3,
            each_cup,
        ),
    ]
}

fn calc_staffing_split(rng: &mut SeededRng) -> Vec<AnswerPart> {
    let staff = 7;

    let rows = ["Swimming", "Fitness class", "Yoga", "Badminton"];
    let plurals = [
        "swimming sessions",
        "fitness classes",
        "yoga sessions",
        "badminton sessions",
    ];
    let ranges: [(i64, i64); 4] = [(4000, 6500), (5500, 7500), (3500, 5000), (4500, 6500)];

    let b_keys = rng.shuffle(&[0usize, 1, 2, 3]);
    let counts = rng.shuffle(&[8i64, 6]);
    let (bk1, bk2) = (b_keys[0], b_keys[1]);
    let (c1, c2) = (counts[0], counts[1]);

    let mut mins = [0i64; 4];
    for (slot, &(lo, hi)) in mins.iter_mut().zip(&ranges) {
        *slot = pick_hundredths(rng, lo, hi);
    }

    let mut total_time = c1 * mins[bk1] + c2 * mins[bk2];
    let mut guard = 0;
    while total_time % staff != 0 && guard < 900 {
        mins[bk1] = pick_hundredths(rng, ranges[bk1].0, ranges[bk1].1);
        mins[bk2] = pick_hundredths(rng, ranges[bk2].0, ranges[bk2].1);
        total_time = c1 * mins[bk1] + c2 * mins[bk2];
        guard += 1;
    }
    let each_staff = round_to((total_time as f64 / staff as f64) / 100.0, 2);

    let a_key = *rng.choice(&[0usize, 1, 2, 3]);
    let a_sessions = rng.int(5, 10);
    let a_mins = mins[a_key];
    let remainder = rng.int(0, a_mins - 1);
    let available = a_mins * a_sessions + remainder;

    let table = qtable2(
        ["Session type", "Minutes per session"],
        &rows
            .iter()
            .zip(mins)
            .map(|(&r, m)| (r, fmt_dp(m as f64 / 100.0, 2)))
            .collect::<Vec<_>>(),
    );

    vec![
        AnswerPart::integer(
            "n8_5sc_a",
            format!("A leisure centre runs sessions.{table}<br><b>(a)</b> A coach has <b>{}</b> minutes available.<br>How many whole {} can be run? <span class=\"endmark\">[2]</span>", fmt_no00(available as f64 / 100.0, 2), plurals[a_key]),
            2,
            a_sessions,
        ),
        AnswerPart::number(
            "n8_5sc_b",
            format!("<b>(b)</b> In one day the centre runs <b>{c1}</b> {} and <b>{c2}</b> {}.<br>The <b>TOTAL</b> session time is shared equally between <b>{staff}</b> staff to supervise.<br>Work out how many minutes <b>EACH</b> staff member supervises. Give your answer to <b>2</b> decimal places. <span class=\"endmark\">[3]</span>", plurals[bk1], plurals[bk2]),
            3,
            each_staff,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ExpectedAnswer;

    fn gen(marks: u32, mode: PaperMode, seed: u32) -> Vec<AnswerPart> {
        let mut rng = SeededRng::new(seed);
        build(marks, mode, &mut rng)
    }

    fn num(part: &AnswerPart) -> f64 {
        match part.answer.as_ref().unwrap() {
            ExpectedAnswer::Number { value } => *value,
            other => panic!("unexpected answer {other:?}"),
        }
    }

    #[test]
    fn one_and_two_mark_questions_are_single_part() {
        for marks in [1, 2] {
            for mode in [PaperMode::NonCalc, PaperMode::Calc] {
                for seed in 0..40 {
                    let parts = gen(marks, mode, seed);
                    assert_eq!(parts.len(), 1);
                    assert_eq!(parts[0].marks, marks);
                }
            }
        }
    }

    #[test]
    fn three_and_four_mark_questions_split_into_two_parts() {
        for marks in [3u32, 4] {
            for mode in [PaperMode::NonCalc, PaperMode::Calc] {
                for seed in 0..40 {
                    let parts = gen(marks, mode, seed);
                    assert_eq!(parts.len(), 2, "marks {marks} seed {seed}");
                    let split = if marks == 3 { (1, 2) } else { (1, 3) };
                    assert_eq!(parts[0].marks, split.0);
                    assert_eq!(parts[1].marks, split.1);
                    assert!(parts[0].text_html.contains("<b>(a)</b>"));
                    assert!(parts[1].text_html.contains("<b>(b)</b>"));
                    // tables appear from 4 marks up
                    assert_eq!(parts[0].text_html.contains("qtable"), marks == 4);
                    assert!(!parts[1].text_html.contains("qtable"));
                }
            }
        }
    }

    #[test]
    fn five_mark_parts_always_sum_to_five() {
        for mode in [PaperMode::NonCalc, PaperMode::Calc] {
            for seed in 0..120 {
                let parts = gen(5, mode, seed);
                assert!(parts.len() >= 2, "seed {seed}");
                assert_eq!(parts.iter().map(|p| p.marks).sum::<u32>(), 5);
                assert_eq!(parts[0].marks, 2);
                assert!(parts[0].text_html.contains("qtable"));
            }
        }
    }

    #[test]
    fn staged_compost_total_shares_between_four_gardeners() {
        let mut found = false;
        for seed in 0..200 {
            let parts = gen(5, PaperMode::NonCalc, seed);
            if parts[0].input.as_ref().unwrap().id != "n8_comp5_a" {
                continue;
            }
            found = true;
            assert_eq!(parts.len(), 4);
            let marks: Vec<u32> = parts.iter().map(|p| p.marks).collect();
            assert_eq!(marks, [2, 1, 1, 1]);
            let total = num(&parts[2]);
            let each = num(&parts[3]);
            assert_eq!(total / 4.0, each, "seed {seed}");
        }
        assert!(found);
    }

    #[test]
    fn volume_share_pair_lists_containers_then_leftover() {
        let mut found = false;
        for seed in 0..200 {
            let parts = gen(5, PaperMode::NonCalc, seed);
            if parts[0].input.as_ref().unwrap().id != "n8_5v_a" {
                continue;
            }
            found = true;
            let input = parts[0].input.as_ref().unwrap();
            assert_eq!(
                input.placeholders,
                Some(["containers".to_string(), "litres left over".to_string()])
            );
            match parts[0].answer.as_ref().unwrap() {
                ExpectedAnswer::Pair { value } => {
                    assert_eq!(value[0].fract(), 0.0);
                    assert_eq!(value[1].fract(), 0.0);
                }
                other => panic!("unexpected answer {other:?}"),
            }
            // whole litres per cup on the non-calculator paper
            assert_eq!(num(&parts[1]).fract(), 0.0, "seed {seed}");
        }
        assert!(found);
    }

    #[test]
    fn water_share_remainders_stay_below_the_container_volume() {
        let mut found = false;
        for seed in 0..300 {
            let parts = gen(5, PaperMode::NonCalc, seed);
            let Some(input) = parts[0].input.as_ref() else {
                continue;
            };
            if input.id != "n8_5v_a" {
                continue;
            }
            found = true;

            let text = &parts[0].text_html;
            let total: i64 = text
                .split("has <b>")
                .nth(1)
                .and_then(|rest| rest.split("</b>").next())
                .and_then(|n| n.parse().ok())
                .unwrap();
            let ExpectedAnswer::Pair { value } = parts[0].answer.as_ref().unwrap() else {
                panic!("expected a pair answer");
            };
            let full = value[0] as i64;
            let rem = value[1] as i64;
            let v_min = (total - rem) / full;
            assert!(
                rem >= 0 && rem < v_min,
                "seed {seed}: remainder {rem} against volume {v_min}"
            );
            assert_eq!(full * v_min + rem, total, "seed {seed}");
        }
        assert!(found);
    }

    #[test]
    fn noncalc_shares_are_whole_numbers() {
        for marks in [1, 2] {
            for seed in 0..60 {
                let parts = gen(marks, PaperMode::NonCalc, seed);
                let value = num(&parts[0]);
                assert_eq!(value.fract(), 0.0, "marks {marks} seed {seed}");
            }
        }
    }

    #[test]
    fn calc_answers_carry_at_most_two_decimals() {
        for marks in 1..=5u32 {
            for seed in 0..40 {
                let parts = gen(marks, PaperMode::Calc, seed);
                for part in &parts {
                    if let Some(ExpectedAnswer::Number { value }) = part.answer.as_ref() {
                        assert!(
                            (value - round_to(*value, 2)).abs() < 1e-9,
                            "marks {marks} seed {seed} value {value}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn same_seed_replays_identically() {
        for marks in 1..=5u32 {
            for mode in [PaperMode::NonCalc, PaperMode::Calc] {
                let a = serde_json::to_string(&gen(marks, mode, 31337)).unwrap();
                let b = serde_json::to_string(&gen(marks, mode, 31337)).unwrap();
                assert_eq!(a, b);
            }
        }
    }
}
