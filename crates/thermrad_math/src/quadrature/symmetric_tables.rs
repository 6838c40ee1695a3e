//! Dunavant symmetric quadrature tables for the triangle.
//!
//! Each entry lists the orbits of one rule in barycentric coordinates.
//! Weights are normalised to sum to one over the triangle.

/// Highest supported polynomial order.
pub const MAX_SYMMETRIC_ORDER: usize = 13;

/// One orbit of the triangle's symmetry group.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Orbit {
    /// The centroid `(1/3, 1/3, 1/3)`.
    Centroid { weight: f64 },
    /// The three permutations of `(a, b, b)` with `b = (1 - a) / 2`.
    S21 { a: f64, weight: f64 },
    /// The six permutations of `(a, b, c)` with `c = 1 - a - b`.
    S111 { a: f64, b: f64, weight: f64 },
}

impl Orbit {
    /// Barycentric points of the orbit paired with the shared weight.
    pub(crate) fn expand(&self) -> (Vec<[f64; 3]>, f64) {
        match *self {
            Orbit::Centroid { weight } => (vec![[1.0 / 3.0; 3]], weight),
            Orbit::S21 { a, weight } => {
                let b = 0.5 * (1.0 - a);
                (vec![[a, b, b], [b, a, b], [b, b, a]], weight)
            }
            Orbit::S111 { a, b, weight } => {
                let c = 1.0 - a - b;
                (
                    vec![
                        [a, b, c],
                        [a, c, b],
                        [b, a, c],
                        [b, c, a],
                        [c, a, b],
                        [c, b, a],
                    ],
                    weight,
                )
            }
        }
    }
}

use Orbit::{Centroid, S111, S21};

const ORDER_1: &[Orbit] = &[Centroid { weight: 1.0 }];

const ORDER_2: &[Orbit] = &[S21 {
    a: 0.666666666666667,
    weight: 0.333333333333333,
}];

const ORDER_3: &[Orbit] = &[
    Centroid { weight: -0.5625 },
    S21 {
        a: 0.6,
        weight: 0.520833333333333,
    },
];

const ORDER_4: &[Orbit] = &[
    S21 {
        a: 0.108103018168070,
        weight: 0.223381589678011,
    },
    S21 {
        a: 0.816847572980459,
        weight: 0.109951743655322,
    },
];

const ORDER_5: &[Orbit] = &[
    Centroid { weight: 0.225 },
    S21 {
        a: 0.059715871789770,
        weight: 0.132394152788506,
    },
    S21 {
        a: 0.797426985353087,
        weight: 0.125939180544827,
    },
];

const ORDER_6: &[Orbit] = &[
    S21 {
        a: 0.501426509658179,
        weight: 0.116786275726379,
    },
    S21 {
        a: 0.873821971016996,
        weight: 0.050844906370207,
    },
    S111 {
        a: 0.053145049844817,
        b: 0.310352451033784,
        weight: 0.082851075618374,
    },
];

const ORDER_7: &[Orbit] = &[
    Centroid {
        weight: -0.149570044467682,
    },
    S21 {
        a: 0.479308067841920,
        weight: 0.175615257433208,
    },
    S21 {
        a: 0.869739794195568,
        weight: 0.053347235608838,
    },
    S111 {
        a: 0.048690315425316,
        b: 0.312865496004874,
        weight: 0.077113760890257,
    },
];

const ORDER_8: &[Orbit] = &[
    Centroid {
        weight: 0.144315607677787,
    },
    S21 {
        a: 0.081414823414554,
        weight: 0.095091634267285,
    },
    S21 {
        a: 0.658861384496480,
        weight: 0.103217370534718,
    },
    S21 {
        a: 0.898905543365938,
        weight: 0.032458497623198,
    },
    S111 {
        a: 0.008394777409958,
        b: 0.263112829634638,
        weight: 0.027230314174435,
    },
];

const ORDER_9: &[Orbit] = &[
    Centroid {
        weight: 0.097135796282799,
    },
    S21 {
        a: 0.020634961602525,
        weight: 0.031334700227139,
    },
    S21 {
        a: 0.125820817014127,
        weight: 0.077827541004774,
    },
    S21 {
        a: 0.623592928761935,
        weight: 0.079647738927210,
    },
    S21 {
        a: 0.910540973211095,
        weight: 0.025577675658698,
    },
    S111 {
        a: 0.036838412054736,
        b: 0.221962989160766,
        weight: 0.043283539377289,
    },
];

const ORDER_10: &[Orbit] = &[
    Centroid {
        weight: 0.090817990382754,
    },
    S21 {
        a: 0.028844733232685,
        weight: 0.036725957756467,
    },
    S21 {
        a: 0.781036849029926,
        weight: 0.045321059435528,
    },
    S111 {
        a: 0.141707219414880,
        b: 0.307939838764121,
        weight: 0.072757916845420,
    },
    S111 {
        a: 0.025003534762686,
        b: 0.246672560639903,
        weight: 0.028327242531057,
    },
    S111 {
        a: 0.009540815400299,
        b: 0.066803251012200,
        weight: 0.009421666963733,
    },
];

const ORDER_12: &[Orbit] = &[
    S21 {
        a: 0.023565220452390,
        weight: 0.025731066440455,
    },
    S21 {
        a: 0.120551215411079,
        weight: 0.043692544538038,
    },
    S21 {
        a: 0.457579229975768,
        weight: 0.062858224217885,
    },
    S21 {
        a: 0.744847708916828,
        weight: 0.034796112930709,
    },
    S21 {
        a: 0.957365299093579,
        weight: 0.006166261051559,
    },
    S111 {
        a: 0.115343494534698,
        b: 0.275713269685514,
        weight: 0.040371557766381,
    },
    S111 {
        a: 0.022838332222257,
        b: 0.281325580989940,
        weight: 0.022356773202303,
    },
    S111 {
        a: 0.025734050548330,
        b: 0.116251915907597,
        weight: 0.017316231108659,
    },
];

const ORDER_13: &[Orbit] = &[
    Centroid {
        weight: 0.052520923400802,
    },
    S21 {
        a: 0.009903630120591,
        weight: 0.011280145209330,
    },
    S21 {
        a: 0.062566729780852,
        weight: 0.031423518362454,
    },
    S21 {
        a: 0.170957326397447,
        weight: 0.047072502504194,
    },
    S21 {
        a: 0.541200855914337,
        weight: 0.047363586536355,
    },
    S21 {
        a: 0.771151009607340,
        weight: 0.031167529045794,
    },
    S21 {
        a: 0.950377217273082,
        weight: 0.007975771465074,
    },
    S111 {
        a: 0.094853828379579,
        b: 0.268794997058761,
        weight: 0.036848402728732,
    },
    S111 {
        a: 0.018100773278807,
        b: 0.291730066734288,
        weight: 0.017401463303822,
    },
    S111 {
        a: 0.022233076674090,
        b: 0.126357385491669,
        weight: 0.015521786839045,
    },
];

/// Orbits of the rule for `order`, or `None` outside `1..=MAX_SYMMETRIC_ORDER`.
///
/// Order 11 is served by the order 12 set; the classic 27-point order 11
/// set places points outside the triangle.
pub(crate) fn orbits(order: usize) -> Option<&'static [Orbit]> {
    let table = match order {
        1 => ORDER_1,
        2 => ORDER_2,
        3 => ORDER_3,
        4 => ORDER_4,
        5 => ORDER_5,
        6 => ORDER_6,
        7 => ORDER_7,
        8 => ORDER_8,
        9 => ORDER_9,
        10 => ORDER_10,
        11 | 12 => ORDER_12,
        13 => ORDER_13,
        _ => return None,
    };
    Some(table)
}
