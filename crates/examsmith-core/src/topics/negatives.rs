//! N9: negative numbers in money, temperature and height contexts.
//!
//! Scenario 1 is money; scenarios 2 and 3 move through temperatures,
//! lifts and altitude. Signed data tables appear at 4 and 5 marks, and
//! part (b) never restates the numerical answer to part (a).
//! Calculator questions use one and two decimal place values
//! throughout.

use crate::model::{AnswerPart, PaperMode};
use crate::numeric::{fmt, fmt_dp, fmt_no00, round_to};
use crate::rng::SeededRng;
use tracing::warn;

use super::{pick_hundredths, pick_tenths, qtable2, REROLL_CAP};

pub(super) fn build(marks_total: u32, mode: PaperMode, rng: &mut SeededRng) -> Vec<AnswerPart> {
    let sc = rng.int(1, 3);
    let parts = if mode.is_calc() {
        calc(marks_total, sc, rng)
    } else {
        noncalc(marks_total, sc, rng)
    };
    parts.unwrap_or_else(|| {
        warn!(marks_total, "no negatives band for the requested marks; issuing the fallback drill");
        vec![AnswerPart::integer(
            "n9_f",
            "Work out: <b>-5 + 8</b>. <span class=\"endmark\">[1]</span>",
            1,
            3,
        )]
    })
}

/// Bank statement rows used at 4 marks, with the sentence each row
/// turns into inside the prompt.
const TX_ROWS: [&str; 4] = ["Salary", "Rent", "Food shop", "Refund"];
const TX_SENTENCES: [&str; 4] = [
    "Salary is paid in.",
    "Rent is paid.",
    "The food shop is paid.",
    "A refund is paid in.",
];

/// Account rows used at 5 marks; `FIRSTS` open a sentence chain and
/// `THENS` continue one.
const ACCOUNT_ROWS: [&str; 4] = ["Deposit", "Bill", "Fee", "Refund"];
const ACCOUNT_FIRSTS: [&str; 4] = [
    "A deposit is paid in.",
    "A bill is paid.",
    "A fee is taken.",
    "A refund is paid in.",
];
const ACCOUNT_THENS: [&str; 4] = [
    "a deposit is paid in.",
    "a bill is paid.",
    "a fee is taken.",
    "a refund is paid in.",
];

/// Weather-station rows used at 4 marks.
const CHANGE_ROWS: [&str; 4] = ["Morning", "Afternoon", "Evening", "Overnight"];
const CHANGE_NAMES: [&str; 4] = ["morning", "afternoon", "evening", "overnight"];

/// Temperature-log change labels used at 5 marks.
const LOG_LABELS: [&str; 3] = ["heating change", "night drop", "wind chill drop"];

// signed renderings: an explicit plus on non-negative values

fn fmt_signed_int(n: i64, unit: &str) -> String {
    format!("{}{n}{unit}", if n >= 0 { "+" } else { "" })
}

fn fmt_signed_2dp(hund: i64, unit: &str) -> String {
    let sign = if hund >= 0 { "+" } else { "-" };
    format!("{sign}{}{unit}", fmt_dp(hund.abs() as f64 / 100.0, 2))
}

fn fmt_money_start_int(v: i64) -> String {
    if v < 0 {
        format!("-£{}", v.abs())
    } else {
        format!("£{v}")
    }
}

fn fmt_money_start_2dp(p: i64) -> String {
    if p < 0 {
        format!("-£{}", fmt_dp(p.abs() as f64 / 100.0, 2))
    } else {
        format!("£{}", fmt_dp(p as f64 / 100.0, 2))
    }
}

fn fmt_signed_money_int(v: i64) -> String {
    format!("{}£{}", if v >= 0 { "+" } else { "-" }, v.abs())
}

fn fmt_signed_money_2dp(p: i64) -> String {
    format!(
        "{}£{}",
        if p >= 0 { "+" } else { "-" },
        fmt_dp(p.abs() as f64 / 100.0, 2)
    )
}

/// Non-zero draw from `lo..=hi`.
fn pick_nonzero(rng: &mut SeededRng, lo: i64, hi: i64) -> i64 {
    let mut v = rng.int(lo, hi);
    let mut guard = 0;
    while v == 0 && guard < REROLL_CAP {
        v = rng.int(lo, hi);
        guard += 1;
    }
    if v == 0 {
        -10
    } else {
        v
    }
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
        let start_abs = rng.int(5, 60);
        let deposit = rng.int(5, 80);
        let ans = -start_abs + deposit;
        return vec![AnswerPart::money(
            "n9_1_nc_s1",
            format!("A bank account balance is <b>-£{start_abs}</b>.<br><b>£{deposit}</b> is paid into the account.<br>What is the new balance? <span class=\"endmark\">[1]</span>"),
            1,
            ans as f64,
        )];
    }
    if sc == 2 {
        let start = -rng.int(1, 15);
        let inc = rng.int(1, 20);
        let ans = start + inc;
        return vec![AnswerPart::integer(
            "n9_1_nc_s2",
            format!("The temperature is <b>{start}°C</b>.<br>It increases by <b>{inc}°C</b>.<br>What is the new temperature? <span class=\"endmark\">[1]</span>"),
            1,
            ans,
        )];
    }

    let start = -rng.int(1, 8);
    let down = rng.int(1, 10);
    let ans = start - down;
    vec![AnswerPart::integer(
        "n9_1_nc_s3",
        format!("A lift is at floor <b>{start}</b>.<br>It goes down <b>{down}</b> floors.<br>What floor is it on now? <span class=\"endmark\">[1]</span>"),
        1,
        ans,
    )]
}

fn nc_two_marks(sc: i64, rng: &mut SeededRng) -> Vec<AnswerPart> {
    if sc == 1 {
        let start_abs = rng.int(10, 80);
        let taken_out = rng.int(5, 60);
        let paid_in = rng.int(10, 90);
        let ans = -start_abs - taken_out + paid_in;
        return vec![AnswerPart::money(
            "n9_2_nc_s1",
            format!("A bank account balance is <b>-£{start_abs}</b>.<br><b>£{taken_out}</b> is taken out of the account.<br>Then <b>£{paid_in}</b> is paid in.<br>Work out the final balance. <span class=\"endmark\">[2]</span>"),
            2,
            ans as f64,
        )];
    }
    if sc == 2 {
        let start = -rng.int(1, 12);
        let fall = rng.int(1, 8);
        let inc = rng.int(1, 12);
        let ans = start - fall * 2 + inc;
        return vec![AnswerPart::integer(
            "n9_2_nc_s2",
            format!("At midnight the temperature is <b>{start}°C</b>.<br>It falls by <b>{fall}°C</b> each hour for <b>2</b> hours.<br>Then it increases by <b>{inc}°C</b>.<br>Work out the final temperature. <span class=\"endmark\">[2]</span>"),
            2,
            ans,
        )];
    }

    let start = -rng.int(5, 40);
    let climb = rng.int(10, 70);
    let down = rng.int(5, 40);
    let ans = start + climb - down;
    vec![AnswerPart::integer(
        "n9_2_nc_s3",
        format!("A hiker starts at <b>{start} m</b> (below sea level).<br>They climb <b>{climb} m</b>.<br>Then they go down <b>{down} m</b>.<br>Work out their final height relative to sea level. <span class=\"endmark\">[2]</span>"),
        2,
        ans,
    )]
}

fn nc_three_marks(sc: i64, rng: &mut SeededRng) -> Vec<AnswerPart> {
    if sc == 1 {
        let start_abs = rng.int(20, 80);
        let deposit = rng.int(10, 60);
        let payment = rng.int(3, 20);

        let a_ans = -start_abs + deposit;
        let b_ans = a_ans - 3 * payment;

        return vec![
            AnswerPart::money(
                "n9_3_nc_s1a",
                format!("<b>(a)</b> A bank account balance is <b>-£{start_abs}</b>.<br><b>£{deposit}</b> is paid into the account.<br>Work out the new balance. <span class=\"endmark\">[1]</span>"),
                1,
                a_ans as f64,
            ),
            AnswerPart::money(
                "n9_3_nc_s1b",
                format!("<b>(b)</b> Then <b>3</b> payments of <b>£{payment}</b> are taken out.<br>Work out the final balance. <span class=\"endmark\">[2]</span>"),
                2,
                b_ans as f64,
            ),
        ];
    }
    if sc == 2 {
        let start = -rng.int(3, 15);
        let inc = rng.int(5, 20);
        let drop1 = rng.int(2, 10);
        let mut drop2 = rng.int(2, 10);
        if drop2 == drop1 {
            drop2 = drop1 + 1;
        }

        let a_ans = start + inc;
        let b_ans = a_ans - drop1 - drop2;

        return vec![
            AnswerPart::integer(
                "n9_3_nc_s2a",
                format!("<b>(a)</b> At <b>6am</b> the temperature is <b>{start}°C</b>.<br>By midday it increases by <b>{inc}°C</b>.<br>Work out the temperature at midday. <span class=\"endmark\">[1]</span>"),
                1,
                a_ans,
            ),
            AnswerPart::integer(
                "n9_3_nc_s2b",
                format!("<b>(b)</b> Overnight the temperature falls by <b>{drop1}°C</b>.<br>Then it falls by <b>{drop2}°C</b> again.<br>Work out the temperature the next morning. <span class=\"endmark\">[2]</span>"),
                2,
                b_ans,
            ),
        ];
    }

    let start = -rng.int(1, 10);
    let up = rng.int(3, 10);
    let down = rng.int(1, 6);

    let a_ans = start + up;
    let b_ans = a_ans - down * 4;

    vec![
        AnswerPart::integer(
            "n9_3_nc_s3a",
            format!("<b>(a)</b> A lift is at floor <b>{start}</b>.<br>It goes up <b>{up}</b> floors.<br>Work out the new floor. <span class=\"endmark\">[1]</span>"),
            1,
            a_ans,
        ),
        AnswerPart::integer(
            "n9_3_nc_s3b",
            format!("<b>(b)</b> Then it goes down <b>{down}</b> floors, repeated <b>4</b> times.<br>Work out the final floor. <span class=\"endmark\">[2]</span>"),
            2,
            b_ans,
        ),
    ]
}

fn nc_four_marks(sc: i64, rng: &mut SeededRng) -> Vec<AnswerPart> {
    if sc == 1 {
        let salary = rng.int(80, 200);
        let rent = -rng.int(40, 120);
        let food = -rng.int(10, 60);
        let refund = rng.int(5, 40);
        let values = [salary, rent, food, refund];

        let table = qtable2(
            ["Transaction", "Amount"],
            &TX_ROWS
                .iter()
                .zip(values)
                .map(|(&r, v)| (r, fmt_signed_money_int(v)))
                .collect::<Vec<_>>(),
        );

        let start_bal = pick_nonzero(rng, -80, 80);

        // a positive start must meet a debit so part (a) crosses zero
        let mut tx_a = *rng.choice(&[0usize, 1, 2, 3]);
        if start_bal > 0 {
            let debits: Vec<usize> = (0..4).filter(|&i| values[i] < 0).collect();
            tx_a = *rng.choice(&debits);
        }
        let a_ans = start_bal + values[tx_a];

        let b_tx = rng.shuffle(&[0usize, 1, 2, 3]);
        let b_ans: i64 = start_bal + b_tx[..3].iter().map(|&i| values[i]).sum::<i64>();
        let b_lines = format!(
            "{}<br>Then {}<br>Then {}<br>",
            TX_SENTENCES[b_tx[0]], TX_SENTENCES[b_tx[1]], TX_SENTENCES[b_tx[2]]
        );

        return vec![
            AnswerPart::money(
                "n9_4_nc_s1a",
                format!("A bank statement shows transactions.<br>{table}<br><b>(a)</b> The account balance starts at <b>{}</b>.<br>{}<br>What is the new balance? <span class=\"endmark\">[1]</span>", fmt_money_start_int(start_bal), TX_SENTENCES[tx_a]),
                1,
                a_ans as f64,
            ),
            AnswerPart::money(
                "n9_4_nc_s1b",
                format!("<b>(b)</b> The account balance starts at <b>{}</b>.<br>{b_lines}Work out the final balance. <span class=\"endmark\">[3]</span>", fmt_money_start_int(start_bal)),
                3,
                b_ans as f64,
            ),
        ];
    }

    let start = -rng.int(6, 20);
    let morning = rng.int(2, 12);
    let afternoon = -rng.int(2, 12);
    let evening = -rng.int(1, 9);
    let overnight = rng.int(1, 7);
    let values = [morning, afternoon, evening, overnight];

    let table = qtable2(
        ["Change time", "Change"],
        &CHANGE_ROWS
            .iter()
            .zip(values)
            .map(|(&r, v)| (r, fmt_signed_int(v, "°C")))
            .collect::<Vec<_>>(),
    );

    let ch_a = *rng.choice(&[0usize, 1, 2, 3]);
    let a_ans = start + values[ch_a];

    let order = rng.shuffle(&[0usize, 1, 2, 3]);
    let b_ans: i64 = start + values.iter().sum::<i64>();
    let b_lines = format!(
        "Apply the {} change.<br>Then apply the {} change.<br>Then apply the {} change.<br>Then apply the {} change.<br>",
        CHANGE_NAMES[order[0]], CHANGE_NAMES[order[1]], CHANGE_NAMES[order[2]], CHANGE_NAMES[order[3]]
    );

    vec![
        AnswerPart::integer(
            "n9_4_nc_s2a",
            format!("A weather station records temperature changes.<br>{table}<br><b>(a)</b> The temperature starts at <b>{start}°C</b>.<br>Apply the {} change.<br>Work out the new temperature. <span class=\"endmark\">[1]</span>", CHANGE_NAMES[ch_a]),
            1,
            a_ans,
        ),
        AnswerPart::integer(
            "n9_4_nc_s2b",
            format!("<b>(b)</b> The temperature starts at <b>{start}°C</b>.<br>{b_lines}Work out the final temperature. <span class=\"endmark\">[3]</span>"),
            3,
            b_ans,
        ),
    ]
}

fn nc_five_marks(sc: i64, rng: &mut SeededRng) -> Vec<AnswerPart> {
    if sc == 1 {
        let start_abs = rng.int(5, 40);
        let start = *rng.choice(&[-start_abs, start_abs]);

        let deposit = rng.int(20, 90);
        let bill = -rng.int(10, 60);
        let fee = -rng.int(5, 25);
        let refund = rng.int(5, 30);
        let values = [deposit, bill, fee, refund];

        let table = qtable2(
            ["Transaction", "Amount"],
            &ACCOUNT_ROWS
                .iter()
                .zip(values)
                .map(|(&r, v)| (r, fmt_signed_money_int(v)))
                .collect::<Vec<_>>(),
        );

        // (a) one credit and one debit, in either order
        let pos_a = *rng.choice(&[0usize, 3]);
        let neg_a = *rng.choice(&[1usize, 2]);
        let a_order = rng.shuffle(&[pos_a, neg_a]);
        let a_ans = start + values[pos_a] + values[neg_a];

        // (b) both debit types, one of them doubled
        let neg_double = *rng.choice(&[1usize, 2]);
        let neg_single = if neg_double == 1 { 2 } else { 1 };
        let pos_b = *rng.choice(&[0usize, 3]);
        let first_two = rng.shuffle(&[neg_single, pos_b]);
        let b_ans = a_ans + values[first_two[0]] + values[first_two[1]] + 2 * values[neg_double];

        let double_then = if neg_double == 1 {
            "<b>2</b> bills are paid."
        } else {
            "<b>2</b> fees are taken."
        };
        let b_lines = format!(
            "{}<br>Then {}<br>Then {double_then}<br>",
            ACCOUNT_FIRSTS[first_two[0]], ACCOUNT_THENS[first_two[1]]
        );

        return vec![
            AnswerPart::money(
                "n9_5_nc_s1a",
                format!("A bank account has these transactions.<br>{table}<br><b>(a)</b> The account balance starts at <b>{}</b>.<br>{}<br>Then {}<br>Work out the new balance. <span class=\"endmark\">[2]</span>", fmt_money_start_int(start), ACCOUNT_FIRSTS[a_order[0]], ACCOUNT_THENS[a_order[1]]),
                2,
                a_ans as f64,
            ),
            AnswerPart::money(
                "n9_5_nc_s1b",
                format!("<b>(b)</b> Start with your answer to part <b>(a)</b>.<br>{b_lines}Work out the final balance. <span class=\"endmark\">[3]</span>"),
                3,
                b_ans as f64,
            ),
        ];
    }
    if sc == 2 {
        let start_temp = -rng.int(6, 20);
        let heating = rng.int(4, 12);
        let night_drop = -rng.int(3, 10);
        let wind_drop = -rng.int(2, 9);
        let values = [heating, night_drop, wind_drop];

        let table = qtable2(
            ["Item", "Value"],
            &[
                ("Start temperature", format!("{start_temp}°C")),
                ("Heating change", fmt_signed_int(heating, "°C")),
                ("Night drop", fmt_signed_int(night_drop, "°C")),
                ("Wind chill drop", fmt_signed_int(wind_drop, "°C")),
            ],
        );

        let a_steps = rng.shuffle(&[0usize, 1, 2]);
        let a_ans = start_temp + values[a_steps[0]] + values[a_steps[1]];

        // only a drop can repeat
        let rep = *rng.choice(&[1usize, 2]);
        let times = 4;
        let b_ans = a_ans + values[rep] * times;

        return vec![
            AnswerPart::integer(
                "n9_5_nc_s2a",
                format!("A temperature log shows changes.<br>{table}<br><b>(a)</b> Start at the start temperature.<br>Apply the {}.<br>Then apply the {}.<br>Work out the temperature. <span class=\"endmark\">[2]</span>", LOG_LABELS[a_steps[0]], LOG_LABELS[a_steps[1]]),
                2,
                a_ans,
            ),
            AnswerPart::integer(
                "n9_5_nc_s2b",
                format!("<b>(b)</b> Start from your answer to part <b>(a)</b>.<br>Apply the {} <b>{times}</b> times.<br>Work out the final temperature. <span class=\"endmark\">[3]</span>", LOG_LABELS[rep]),
                3,
                b_ans,
            ),
        ];
    }

    let days = ["Monday", "Tuesday", "Wednesday", "Thursday"];
    let mags = [
        rng.int(5, 25),
        rng.int(5, 30),
        rng.int(3, 20),
        rng.int(4, 22),
    ];
    let signs = rng.shuffle(&[-1i64, -1, 1, 1]);
    let changes = [
        signs[0] * mags[0],
        signs[1] * mags[1],
        signs[2] * mags[2],
        signs[3] * mags[3],
    ];

    let table = qtable2(
        ["Day", "Change in altitude"],
        &days
            .iter()
            .zip(changes)
            .map(|(&d, c)| (d, fmt_signed_int(c, " m")))
            .collect::<Vec<_>>(),
    );

    let start = pick_nonzero(rng, -250, 250);

    // both parts mix one climbing day with one descending day
    let neg: Vec<usize> = (0..4).filter(|&i| changes[i] < 0).collect();
    let pos: Vec<usize> = (0..4).filter(|&i| changes[i] > 0).collect();

    let a_neg = *rng.choice(&neg);
    let a_pos = *rng.choice(&pos);
    let a_days = rng.shuffle(&[a_neg, a_pos]);

    let b_neg = if neg[0] == a_neg { neg[1] } else { neg[0] };
    let b_pos = if pos[0] == a_pos { pos[1] } else { pos[0] };
    let b_days = rng.shuffle(&[b_neg, b_pos]);

    let a_ans = start + changes[a_days[0]] + changes[a_days[1]];

    let adjust = rng.int(3, 25);
    let adjust_op = *rng.choice(&["add", "subtract"]);
    let adjust_signed = if adjust_op == "add" { adjust } else { -adjust };

    let use_double = *rng.choice(&[true, false]);
    let (b_ans, b_instr) = if use_double {
        let dbl_day = *rng.choice(&b_days);
        let other_day = if b_days[0] == dbl_day {
            b_days[1]
        } else {
            b_days[0]
        };
        (
            a_ans + changes[other_day] + 2 * changes[dbl_day] + adjust_signed,
            format!(
                "Add {}.<br>Then add <b>double</b> {}.<br>Then {adjust_op} <b>{adjust} m</b> (an extra change).<br>",
                days[other_day], days[dbl_day]
            ),
        )
    } else {
        (
            a_ans + changes[b_days[0]] + changes[b_days[1]] + adjust_signed,
            format!(
                "Add {} and {}.<br>Then {adjust_op} <b>{adjust} m</b> (an extra change).<br>",
                days[b_days[0]], days[b_days[1]]
            ),
        )
    };

    vec![
        AnswerPart::integer(
            "n9_5_nc_s3a",
            format!("A hiker records changes in altitude each day.<br>{table}<br><b>(a)</b> The altitude starts at <b>{start} m</b>.<br>Add {} and {}.<br>Work out the altitude. <span class=\"endmark\">[2]</span>", days[a_days[0]], days[a_days[1]]),
            2,
            a_ans,
        ),
        AnswerPart::integer(
            "n9_5_nc_s3b",
            format!("<b>(b)</b> Start from your answer to part <b>(a)</b>.<br>{b_instr}Work out the final altitude. <span class=\"endmark\">[3]</span>"),
            3,
            b_ans,
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
        let start_abs_p = pick_hundredths(rng, 500, 9000);
        let deposit_p = pick_hundredths(rng, 500, 9000);
        let ans_p = -start_abs_p + deposit_p;
        return vec![AnswerPart::money(
            "n9_1_c_s1",
            format!("A bank account balance is <b>-£{}</b>.<br><b>£{}</b> is paid into the account.<br>What is the new balance? <span class=\"endmark\">[1]</span>", fmt_dp(start_abs_p as f64 / 100.0, 2), fmt_dp(deposit_p as f64 / 100.0, 2)),
            1,
            round_to(ans_p as f64 / 100.0, 2),
        )];
    }
    if sc == 2 {
        let start_tenth = pick_tenths(rng, 10, 200);
        let inc_hund = pick_hundredths(rng, 100, 2500);
        let start = -(start_tenth as f64) / 10.0;

        // hundredths keep the arithmetic exact
        let ans_hund = -start_tenth * 10 + inc_hund;
        let ans = ans_hund as f64 / 100.0;

        return vec![AnswerPart::number(
            "n9_1_c_s2",
            format!("The temperature is <b>{}°C</b>.<br>It increases by <b>{}°C</b>.<br>What is the new temperature? <span class=\"endmark\">[1]</span>", fmt_dp(start, 1), fmt_dp(inc_hund as f64 / 100.0, 2)),
            1,
            round_to(ans, 2),
        )];
    }

    let start_int = rng.int(1, 8);
    let start = -(start_int as f64 + 0.5);
    let down_int = rng.int(1, 10);
    let down_frac = *rng.choice(&[0.25, 0.5, 0.75]);
    let down = down_int as f64 + down_frac;
    let ans = start - down;

    vec![AnswerPart::number(
        "n9_1_c_s3",
        format!("A lift is at a height of <b>{} m</b> relative to ground level.<br>It goes down <b>{} m</b>.<br>What is its new height? <span class=\"endmark\">[1]</span>", fmt(start, 2), fmt(down, 2)),
        1,
        round_to(ans, 2),
    )]
}

fn calc_two_marks(sc: i64, rng: &mut SeededRng) -> Vec<AnswerPart> {
    if sc == 1 {
        let start_abs_p = pick_hundredths(rng, 800, 12000);
        let out_p = pick_hundredths(rng, 200, 9000);
        let in_p = pick_hundredths(rng, 500, 12000);
        let ans_p = -start_abs_p - out_p + in_p;
        return vec![AnswerPart::money(
            "n9_2_c_s1",
            format!("A bank account balance is <b>-£{}</b>.<br><b>£{}</b> is taken out of the account.<br>Then <b>£{}</b> is paid in.<br>Work out the final balance. <span class=\"endmark\">[2]</span>", fmt_dp(start_abs_p as f64 / 100.0, 2), fmt_dp(out_p as f64 / 100.0, 2), fmt_dp(in_p as f64 / 100.0, 2)),
            2,
            round_to(ans_p as f64 / 100.0, 2),
        )];
    }
    if sc == 2 {
        let start_tenth = pick_tenths(rng, 20, 200);
        let fall_hund = pick_hundredths(rng, 50, 600);
        let inc_tenth = pick_tenths(rng, 20, 120);

        let start = -(start_tenth as f64) / 10.0;
        let ans_hund = -start_tenth * 10 - fall_hund * 2 + inc_tenth * 10;

        return vec![AnswerPart::number(
            "n9_2_c_s2",
            format!("At midnight the temperature is <b>{}°C</b>.<br>It falls by <b>{}°C</b> each hour for <b>2</b> hours.<br>Then it increases by <b>{}°C</b>.<br>Work out the final temperature. <span class=\"endmark\">[2]</span>", fmt_dp(start, 1), fmt_dp(fall_hund as f64 / 100.0, 2), fmt_dp(inc_tenth as f64 / 10.0, 1)),
            2,
            round_to(ans_hund as f64 / 100.0, 2),
        )];
    }

    let start_tenth = pick_tenths(rng, 50, 350);
    let climb_hund = pick_hundredths(rng, 800, 6000);
    let down_tenth = pick_tenths(rng, 20, 300);

    let start = -(start_tenth as f64) / 10.0;
    let ans_hund = -start_tenth * 10 + climb_hund - down_tenth * 10;

    vec![AnswerPart::number(
        "n9_2_c_s3",
        format!("A hiker starts at <b>{} m</b> (below sea level).<br>They climb <b>{} m</b>.<br>Then they go down <b>{} m</b>.<br>Work out their final height relative to sea level. <span class=\"endmark\">[2]</span>", fmt_dp(start, 1), fmt_dp(climb_hund as f64 / 100.0, 2), fmt_dp(down_tenth as f64 / 10.0, 1)),
        2,
        round_to(ans_hund as f64 / 100.0, 2),
    )]
}

fn calc_three_marks(sc: i64, rng: &mut SeededRng) -> Vec<AnswerPart> {
    if sc == 1 {
        let start_abs_p = pick_hundredths(rng, 1500, 12000);
        let deposit_p = pick_hundredths(rng, 500, 9000);
        let payment_p = pick_hundredths(rng, 200, 3000);

        let a_ans_p = -start_abs_p + deposit_p;
        let b_ans_p = a_ans_p - 3 * payment_p;

        return vec![
            AnswerPart::money(
                "n9_3_c_s1a",
                format!("<b>(a)</b> A bank account balance is <b>-£{}</b>.<br><b>£{}</b> is paid into the account.<br>Work out the new balance. <span class=\"endmark\">[1]</span>", fmt_dp(start_abs_p as f64 / 100.0, 2), fmt_dp(deposit_p as f64 / 100.0, 2)),
                1,
                round_to(a_ans_p as f64 / 100.0, 2),
            ),
            AnswerPart::money(
                "n9_3_c_s1b",
                format!("<b>(b)</b> Then <b>3</b> payments of <b>£{}</b> are taken out.<br>Work out the final balance. <span class=\"endmark\">[2]</span>", fmt_dp(payment_p as f64 / 100.0, 2)),
                2,
                round_to(b_ans_p as f64 / 100.0, 2),
            ),
        ];
    }
    if sc == 2 {
        let start_tenth = pick_tenths(rng, 20, 200);
        let inc_hund = pick_hundredths(rng, 300, 2000);
        let drop1_tenth = pick_tenths(rng, 20, 120);
        let drop2_hund = pick_hundredths(rng, 200, 1500);

        let start = -(start_tenth as f64) / 10.0;
        let a_ans_hund = -start_tenth * 10 + inc_hund;
        let b_ans_hund = a_ans_hund - drop1_tenth * 10 - drop2_hund;

        return vec![
            AnswerPart::number(
                "n9_3_c_s2a",
                format!("<b>(a)</b> At <b>6am</b> the temperature is <b>{}°C</b>.<br>By midday it increases by <b>{}°C</b>.<br>Work out the temperature at midday. <span class=\"endmark\">[1]</span>", fmt_dp(start, 1), fmt_dp(inc_hund as f64 / 100.0, 2)),
                1,
                round_to(a_ans_hund as f64 / 100.0, 2),
            ),
            AnswerPart::number(
                "n9_3_c_s2b",
                format!("<b>(b)</b> Overnight the temperature falls by <b>{}°C</b>.<br>Then it falls by <b>{}°C</b> again.<br>Work out the temperature the next morning. <span class=\"endmark\">[2]</span>", fmt_dp(drop1_tenth as f64 / 10.0, 1), fmt_dp(drop2_hund as f64 / 100.0, 2)),
                2,
                round_to(b_ans_hund as f64 / 100.0, 2),
            ),
        ];
    }

    let start_int = rng.int(1, 10);
    let start_hund = -(start_int * 100 + 50);
    let start = start_hund as f64 / 100.0;

    let up_tenth = pick_tenths(rng, 20, 120);
    let down_hund = pick_hundredths(rng, 50, 600);

    let a_ans_hund = start_hund + up_tenth * 10;
    let b_ans_hund = a_ans_hund - down_hund * 4;

    vec![
        AnswerPart::number(
            "n9_3_c_s3a",
            format!("<b>(a)</b> A lift is at a height of <b>{} m</b> relative to ground level.<br>It goes up <b>{} m</b>.<br>Work out the new height. <span class=\"endmark\">[1]</span>", fmt(start, 2), fmt_dp(up_tenth as f64 / 10.0, 1)),
            1,
            round_to(a_ans_hund as f64 / 100.0, 2),
        ),
        AnswerPart::number(
            "n9_3_c_s3b",
            format!("<b>(b)</b> Then it goes down <b>{} m</b>, repeated <b>4</b> times.<br>Work out the final height. <span class=\"endmark\">[2]</span>", fmt_dp(down_hund as f64 / 100.0, 2)),
            2,
            round_to(b_ans_hund as f64 / 100.0, 2),
        ),
    ]
}

fn calc_four_marks(sc: i64, rng: &mut SeededRng) -> Vec<AnswerPart> {
    if sc == 1 {
        let salary_p = pick_hundredths(rng, 8000, 20000);
        let rent_p = -pick_hundredths(rng, 4000, 12000);
        let food_p = -pick_hundredths(rng, 1000, 6000);
        let refund_p = pick_hundredths(rng, 500, 4000);
        let values = [salary_p, rent_p, food_p, refund_p];

        let table = qtable2(
            ["Transaction", "Amount"],
            &TX_ROWS
                .iter()
                .zip(values)
                .map(|(&r, v)| (r, fmt_signed_money_2dp(v)))
                .collect::<Vec<_>>(),
        );

        let start_abs_p = pick_hundredths(rng, 500, 9000);
        let start_p = *rng.choice(&[-start_abs_p, start_abs_p]);

        let mut tx_a = *rng.choice(&[0usize, 1, 2, 3]);
        if start_p > 0 {
            let debits: Vec<usize> = (0..4).filter(|&i| values[i] < 0).collect();
            tx_a = *rng.choice(&debits);
        }
        let a_ans_p = start_p + values[tx_a];

        let b_tx = rng.shuffle(&[0usize, 1, 2, 3]);
        let b_ans_p: i64 = start_p + b_tx[..3].iter().map(|&i| values[i]).sum::<i64>();
        let b_lines = format!(
            "{}<br>Then {}<br>Then {}<br>",
            TX_SENTENCES[b_tx[0]], TX_SENTENCES[b_tx[1]], TX_SENTENCES[b_tx[2]]
        );

        return vec![
            AnswerPart::money(
                "n9_4_c_s1a",
                format!("A bank statement shows transactions.<br>{table}<br><b>(a)</b> The account balance starts at <b>{}</b>.<br>{}<br>What is the new balance? <span class=\"endmark\">[1]</span>", fmt_money_start_2dp(start_p), TX_SENTENCES[tx_a]),
                1,
                round_to(a_ans_p as f64 / 100.0, 2),
            ),
            AnswerPart::money(
                "n9_4_c_s1b",
                format!("<b>(b)</b> The account balance starts at <b>{}</b>.<br>{b_lines}Work out the final balance. Give your answer to <b>2</b> decimal places. <span class=\"endmark\">[3]</span>", fmt_money_start_2dp(start_p)),
                3,
                round_to(b_ans_p as f64 / 100.0, 2),
            ),
        ];
    }

    let start_hund = -pick_hundredths(rng, 300, 1600);
    let morning_hund = pick_hundredths(rng, 200, 1200);
    let afternoon_hund = -pick_hundredths(rng, 150, 1200);
    let evening_hund = -pick_hundredths(rng, 100, 900);
    let overnight_hund = pick_hundredths(rng, 100, 700);
    let values = [morning_hund, afternoon_hund, evening_hund, overnight_hund];

    let table = qtable2(
        ["Change time", "Change"],
        &CHANGE_ROWS
            .iter()
            .zip(values)
            .map(|(&r, v)| (r, fmt_signed_2dp(v, "°C")))
            .collect::<Vec<_>>(),
    );

    let ch_a = *rng.choice(&[0usize, 1, 2, 3]);
    let a_ans_hund = start_hund + values[ch_a];

    let order = rng.shuffle(&[0usize, 1, 2, 3]);
    let b_ans_hund: i64 = start_hund + values.iter().sum::<i64>();
    let b_lines = format!(
        "Apply the {} change.<br>Then apply the {} change.<br>Then apply the {} change.<br>Then apply the {} change.<br>",
        CHANGE_NAMES[order[0]], CHANGE_NAMES[order[1]], CHANGE_NAMES[order[2]], CHANGE_NAMES[order[3]]
    );

    vec![
        AnswerPart::number(
            "n9_4_c_s2a",
            format!("A weather station records temperature changes.<br>{table}<br><b>(a)</b> The temperature starts at <b>{}°C</b>.<br>Apply the {} change.<br>Work out the new temperature. Give your answer to <b>2</b> decimal places. <span class=\"endmark\">[1]</span>", fmt_no00(start_hund as f64 / 100.0, 2), CHANGE_NAMES[ch_a]),
            1,
            round_to(a_ans_hund as f64 / 100.0, 2),
        ),
        AnswerPart::number(
            "n9_4_c_s2b",
            format!("<b>(b)</b> The temperature starts at <b>{}°C</b>.<br>{b_lines}Work out the final temperature. Give your answer to <b>2</b> decimal places. <span class=\"endmark\">[3]</span>", fmt_no00(start_hund as f64 / 100.0, 2)),
            3,
            round_to(b_ans_hund as f64 / 100.0, 2),
        ),
    ]
}

fn calc_five_marks(sc: i64, rng: &mut SeededRng) -> Vec<AnswerPart> {
    if sc == 1 {
        let start_abs_p = pick_hundredths(rng, 500, 9000);
        let start_p = *rng.choice(&[-start_abs_p, start_abs_p]);

        let deposit_p = pick_hundredths(rng, 2000, 9000);
        let bill_p = -pick_hundredths(rng, 1000, 6000);
        let fee_p = -pick_hundredths(rng, 500, 2500);
        let refund_p = pick_hundredths(rng, 500, 3000);
        let values = [deposit_p, bill_p, fee_p, refund_p];

        let table = qtable2(
            ["Transaction", "Amount"],
            &ACCOUNT_ROWS
                .iter()
                .zip(values)
                .map(|(&r, v)| (r, fmt_signed_money_2dp(v)))
                .collect::<Vec<_>>(),
        );

        let pos_a = *rng.choice(&[0usize, 3]);
        let neg_a = *rng.choice(&[1usize, 2]);
        let a_order = rng.shuffle(&[pos_a, neg_a]);
        let a_ans_p = start_p + values[pos_a] + values[neg_a];

        let neg_double = *rng.choice(&[1usize, 2]);
        let neg_single = if neg_double == 1 { 2 } else { 1 };
        let pos_b = *rng.choice(&[0usize, 3]);
        let first_two = rng.shuffle(&[neg_single, pos_b]);
        let b_ans_p =
            a_ans_p + values[first_two[0]] + values[first_two[1]] + 2 * values[neg_double];

        let double_then = if neg_double == 1 {
            "<b>2</b> bills are paid."
        } else {
            "<b>2</b> fees are taken."
        };
        let b_lines = format!(
            "{}<br>Then {}<br>Then {double_then}<br>",
            ACCOUNT_FIRSTS[first_two[0]], ACCOUNT_THENS[first_two[1]]
        );

        return vec![
            AnswerPart::money(
                "n9_5_c_s1a",
                format!("A bank account has these transactions.<br>{table}<br><b>(a)</b> The account balance starts at <b>{}</b>.<br>{}<br>Then {}<br>Work out the new balance. Give your answer to <b>2</b> decimal places. <span class=\"endmark\">[2]</span>", fmt_money_start_2dp(start_p), ACCOUNT_FIRSTS[a_order[0]], ACCOUNT_THENS[a_order[1]]),
                2,
                round_to(a_ans_p as f64 / 100.0, 2),
            ),
            AnswerPart::money(
                "n9_5_c_s1b",
                format!("<b>(b)</b> Start with your answer to part <b>(a)</b>.<br>{b_lines}Work out the final balance. Give your answer to <b>2</b> decimal places. <span class=\"endmark\">[3]</span>"),
                3,
                round_to(b_ans_p as f64 / 100.0, 2),
            ),
        ];
    }
    if sc == 2 {
        let start_hund = -pick_hundredths(rng, 300, 1600);
        let heating_hund = pick_hundredths(rng, 400, 1200);
        let night_hund = -pick_hundredths(rng, 300, 1000);
        let wind_hund = -pick_hundredths(rng, 200, 900);
        let values = [heating_hund, night_hund, wind_hund];

        let table = qtable2(
            ["Item", "Value"],
            &[
                (
                    "Start temperature",
                    format!("{}°C", fmt_no00(start_hund as f64 / 100.0, 2)),
                ),
                ("Heating change", fmt_signed_2dp(heating_hund, "°C")),
                ("Night drop", fmt_signed_2dp(night_hund, "°C")),
                ("Wind chill drop", fmt_signed_2dp(wind_hund, "°C")),
            ],
        );

        let a_steps = rng.shuffle(&[0usize, 1, 2]);
        let a_ans_hund = start_hund + values[a_steps[0]] + values[a_steps[1]];

        let rep = *rng.choice(&[1usize, 2]);
        let times = 4;
        let b_ans_hund = a_ans_hund + values[rep] * times;

        return vec![
            AnswerPart::number(
                "n9_5_c_s2a",
                format!("A temperature log shows changes.<br>{table}<br><b>(a)</b> Start at the start temperature.<br>Apply the {}.<br>Then apply the {}.<br>Work out the temperature. <span class=\"endmark\">[2]</span>", LOG_LABELS[a_steps[0]], LOG_LABELS[a_steps[1]]),
                2,
                round_to(a_ans_hund as f64 / 100.0, 2),
            ),
            AnswerPart::number(
                "n9_5_c_s2b",
                format!("<b>(b)</b> Start from your answer to part <b>(a)</b>.<br>Apply the {} <b>{times}</b> times.<br>Work out the final temperature. <span class=\"endmark\">[3]</span>", LOG_LABELS[rep]),
                3,
                round_to(b_ans_hund as f64 / 100.0, 2),
            ),
        ];
    }

    let days = ["Monday", "Tuesday", "Wednesday", "Thursday"];
    let mags = [
        pick_hundredths(rng, 500, 2500),
        pick_hundredths(rng, 500, 3000),
        pick_hundredths(rng, 300, 2000),
        pick_hundredths(rng, 400, 2200),
    ];
    let signs = rng.shuffle(&[-1i64, -1, 1, 1]);
    let changes = [
        signs[0] * mags[0],
        signs[1] * mags[1],
        signs[2] * mags[2],
        signs[3] * mags[3],
    ];

    let table = qtable2(
        ["Day", "Change in altitude"],
        &days
            .iter()
            .zip(changes)
            .map(|(&d, c)| (d, fmt_signed_2dp(c, " m")))
            .collect::<Vec<_>>(),
    );

    let start_abs_p = pick_hundredths(rng, 500, 20000);
    let start_p = *rng.choice(&[-start_abs_p, start_abs_p]);

    let neg: Vec<usize> = (0..4).filter(|&i| changes[i] < 0).collect();
    let pos: Vec<usize> = (0..4).filter(|&i| changes[i] > 0).collect();

    let a_neg = *rng.choice(&neg);
    let a_pos = *rng.choice(&pos);
    let a_days = rng.shuffle(&[a_neg, a_pos]);

    let b_neg = if neg[0] == a_neg { neg[1] } else { neg[0] };
    let b_pos = if pos[0] == a_pos { pos[1] } else { pos[0] };
    let b_days = rng.shuffle(&[b_neg, b_pos]);

    let a_ans_p = start_p + changes[a_days[0]] + changes[a_days[1]];

    let adjust_p = pick_hundredths(rng, 200, 4000);
    let adjust_op = *rng.choice(&["add", "subtract"]);
    let adjust_signed_p = if adjust_op == "add" {
        adjust_p
    } else {
        -adjust_p
    };

    let use_double = *rng.choice(&[true, false]);
    let (b_ans_p, b_instr) = if use_double {
        let dbl_day = *rng.choice(&b_days);
        let other_day = if b_days[0] == dbl_day {
            b_days[1]
        } else {
            b_days[0]
        };
        let &(mult, mult_word) = rng.choice(&[
            (2i64, "double"),
            (3, "triple"),
            (4, "quadruple"),
            (5, "five times"),
        ]);
        (
            a_ans_p + changes[other_day] + mult * changes[dbl_day] + adjust_signed_p,
            format!(
                "Add {}.<br>Then add <b>{mult_word}</b> {}.<br>Then {adjust_op} <b>{} m</b> (an extra change).<br>",
                days[other_day], days[dbl_day], fmt_dp(adjust_p as f64 / 100.0, 2)
            ),
        )
    } else {
        (
            a_ans_p + changes[b_days[0]] + changes[b_days[1]] + adjust_signed_p,
            format!(
                "Add {} and {}.<br>Then {adjust_op} <b>{} m</b> (an extra change).<br>",
                days[b_days[0]], days[b_days[1]], fmt_dp(adjust_p as f64 / 100.0, 2)
            ),
        )
    };

    vec![
        AnswerPart::number(
            "n9_5_c_s3a",
            format!("A hiker records changes in altitude each day.<br>{table}<br><b>(a)</b> The altitude starts at <b>{} m</b>.<br>Add {} and {}.<br>Work out the altitude. Give your answer to <b>2</b> decimal places. <span class=\"endmark\">[2]</span>", fmt_dp(start_p as f64 / 100.0, 2), days[a_days[0]], days[a_days[1]]),
            2,
            round_to(a_ans_p as f64 / 100.0, 2),
        ),
        AnswerPart::number(
            "n9_5_c_s3b",
            format!("<b>(b)</b> Start from your answer to part <b>(a)</b>.<br>{b_instr}Work out the final altitude. Give your answer to <b>2</b> decimal places. <span class=\"endmark\">[3]</span>"),
            3,
            round_to(b_ans_p as f64 / 100.0, 2),
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
    fn signed_formats_show_an_explicit_plus() {
        assert_eq!(fmt_signed_int(5, "°C"), "+5°C");
        assert_eq!(fmt_signed_int(-3, " m"), "-3 m");
        assert_eq!(fmt_signed_2dp(125, ""), "+1.25");
        assert_eq!(fmt_signed_2dp(-250, "°C"), "-2.50°C");
        assert_eq!(fmt_money_start_int(7), "£7");
        assert_eq!(fmt_money_start_int(-40), "-£40");
        assert_eq!(fmt_money_start_2dp(-501), "-£5.01");
        assert_eq!(fmt_signed_money_int(-12), "-£12");
        assert_eq!(fmt_signed_money_2dp(12345), "+£123.45");
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
    fn three_mark_questions_split_one_then_two() {
        for mode in [PaperMode::NonCalc, PaperMode::Calc] {
            for seed in 0..40 {
                let parts = gen(3, mode, seed);
                assert_eq!(parts.len(), 2, "seed {seed}");
                assert_eq!(parts[0].marks, 1);
                assert_eq!(parts[1].marks, 2);
                assert!(parts[0].text_html.contains("<b>(a)</b>"));
                assert!(parts[1].text_html.contains("<b>(b)</b>"));
                assert!(!parts[0].text_html.contains("qtable"));
            }
        }
    }

    #[test]
    fn four_mark_questions_carry_a_signed_table() {
        for mode in [PaperMode::NonCalc, PaperMode::Calc] {
            for seed in 0..40 {
                let parts = gen(4, mode, seed);
                assert_eq!(parts.len(), 2, "seed {seed}");
                assert_eq!(parts[0].marks, 1);
                assert_eq!(parts[1].marks, 3);
                assert!(parts[0].text_html.contains("qtable"));
                assert!(parts[0].text_html.contains('+'), "seed {seed}");
                assert!(!parts[1].text_html.contains("qtable"));
            }
        }
    }

    #[test]
    fn five_mark_part_b_builds_on_part_a() {
        for mode in [PaperMode::NonCalc, PaperMode::Calc] {
            for seed in 0..60 {
                let parts = gen(5, mode, seed);
                assert_eq!(parts.len(), 2, "seed {seed}");
                assert_eq!(parts[0].marks, 2);
                assert_eq!(parts[1].marks, 3);
                assert!(parts[0].text_html.contains("qtable"));
                assert!(
                    parts[1].text_html.contains("your answer to part <b>(a)</b>"),
                    "seed {seed}"
                );
            }
        }
    }

    #[test]
    fn positive_start_meets_a_debit_in_part_a() {
        let mut found = false;
        for seed in 0..300 {
            let parts = gen(4, PaperMode::NonCalc, seed);
            if parts[0].input.as_ref().unwrap().id != "n9_4_nc_s1a" {
                continue;
            }
            let text = &parts[0].text_html;
            if !text.contains("starts at <b>£") {
                continue;
            }
            found = true;
            assert!(
                text.contains("Rent is paid.") || text.contains("The food shop is paid."),
                "seed {seed}"
            );
        }
        assert!(found);
    }

    #[test]
    fn noncalc_answers_are_integers() {
        for marks in 1..=5u32 {
            for seed in 0..40 {
                for part in gen(marks, PaperMode::NonCalc, seed) {
                    assert_eq!(num(&part).fract(), 0.0, "marks {marks} seed {seed}");
                }
            }
        }
    }

    #[test]
    fn calc_answers_carry_at_most_two_decimals() {
        for marks in 1..=5u32 {
            for seed in 0..40 {
                for part in gen(marks, PaperMode::Calc, seed) {
                    let value = num(&part);
                    assert!(
                        (value - round_to(value, 2)).abs() < 1e-9,
                        "marks {marks} seed {seed} value {value}"
                    );
                }
            }
        }
    }

    #[test]
    fn same_seed_replays_identically() {
        for marks in 1..=5u32 {
            for mode in [PaperMode::NonCalc, PaperMode::Calc] {
                let a = serde_json::to_string(&gen(marks, mode, 777)).unwrap();
                let b = serde_json::to_string(&gen(marks, mode, 777)).unwrap();
                assert_eq!(a, b);
            }
        }
    }
}
