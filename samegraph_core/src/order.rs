use samegraph_common::Node;
use std::cmp::Ordering;

/// Recursion limit for the structural fallback ordering. Past this depth two
/// nodes are ordered by storage identity so that cyclic graphs still sort.
const MAX_ORDER_DEPTH: usize = 64;

/// Natural ordering between two scalar nodes of the same variant, `None`
/// when the pair has no meaningful natural order.
pub fn natural_cmp(a: &Node, b: &Node) -> Option<Ordering> {
    match (a, b) {
        (Node::Bool(x), Node::Bool(y)) => Some(x.cmp(y)),
        (Node::Int(x), Node::Int(y)) => Some(x.cmp(y)),
        (Node::Float(x), Node::Float(y)) => Some(x.total_cmp(y)),
        (Node::Decimal(x), Node::Decimal(y)) => {
            Some(decimal_cmp(x, y).unwrap_or_else(|| x.cmp(y)))
        }
        (Node::Text(x), Node::Text(y)) => Some(x.cmp(y)),
        (Node::Instant(x), Node::Instant(y)) => Some(x.cmp(y)),
        (
            Node::Enum {
                type_name: tx,
                variant: vx,
            },
            Node::Enum {
                type_name: ty,
                variant: vy,
            },
        ) => Some(tx.cmp(ty).then_with(|| vx.cmp(vy))),
        _ => None,
    }
}

/// Total structural ordering over arbitrary nodes, used as the default
/// fallback when sorting collections of non-comparable elements before the
/// order-insensitive pairwise comparison. Deterministic within one match
/// call, not meaningful outside tie-breaking.
pub fn structural_cmp(a: &Node, b: &Node) -> Ordering {
    cmp_at_depth(a, b, 0)
}

fn cmp_at_depth(a: &Node, b: &Node, depth: usize) -> Ordering {
    if depth >= MAX_ORDER_DEPTH {
        return a.identity().cmp(&b.identity());
    }
    if let Some(ordering) = natural_cmp(a, b) {
        return ordering;
    }
    variant_rank(a)
        .cmp(&variant_rank(b))
        .then_with(|| same_variant_cmp(a, b, depth))
}

fn variant_rank(node: &Node) -> u8 {
    match node {
        Node::Null => 0,
        Node::Bool(_) => 1,
        Node::Int(_) => 2,
        Node::Float(_) => 3,
        Node::Decimal(_) => 4,
        Node::Text(_) => 5,
        Node::Instant(_) => 6,
        Node::Enum { .. } => 7,
        Node::Seq(_) => 8,
        Node::Set(_) => 9,
        Node::Map(_) => 10,
        Node::Object(_) => 11,
        Node::Unreadable(_) => 12,
    }
}

fn same_variant_cmp(a: &Node, b: &Node, depth: usize) -> Ordering {
    match (a, b) {
        (Node::Seq(xs), Node::Seq(ys)) | (Node::Set(xs), Node::Set(ys)) => xs
            .len()
            .cmp(&ys.len())
            .then_with(|| elementwise_cmp(xs, ys, depth + 1)),
        (Node::Map(xs), Node::Map(ys)) => {
            let order = xs.len().cmp(&ys.len());
            if order != Ordering::Equal {
                return order;
            }
            let mut left: Vec<&(String, Node)> = xs.iter().collect();
            let mut right: Vec<&(String, Node)> = ys.iter().collect();
            left.sort_by(|p, q| p.0.cmp(&q.0));
            right.sort_by(|p, q| p.0.cmp(&q.0));
            for (x, y) in left.iter().zip(right.iter()) {
                let order = x
                    .0
                    .cmp(&y.0)
                    .then_with(|| cmp_at_depth(&x.1, &y.1, depth + 1));
                if order != Ordering::Equal {
                    return order;
                }
            }
            Ordering::Equal
        }
        (Node::Object(x), Node::Object(y)) => {
            if std::rc::Rc::ptr_eq(x, y) {
                return Ordering::Equal;
            }
            let x = x.borrow();
            let y = y.borrow();
            let order = x
                .type_name()
                .cmp(y.type_name())
                .then_with(|| x.properties().len().cmp(&y.properties().len()));
            if order != Ordering::Equal {
                return order;
            }
            for (px, py) in x.properties().iter().zip(y.properties().iter()) {
                let order = px
                    .0
                    .cmp(&py.0)
                    .then_with(|| cmp_at_depth(&px.1, &py.1, depth + 1));
                if order != Ordering::Equal {
                    return order;
                }
            }
            Ordering::Equal
        }
        (Node::Unreadable(x), Node::Unreadable(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

fn elementwise_cmp(xs: &[Node], ys: &[Node], depth: usize) -> Ordering {
    for (x, y) in xs.iter().zip(ys.iter()) {
        let order = cmp_at_depth(x, y, depth);
        if order != Ordering::Equal {
            return order;
        }
    }
    Ordering::Equal
}

/// Compare two decimal literals by numeric value, so `1.0` equals `1.00`.
/// Returns `None` when either literal does not parse as a decimal number.
pub fn decimal_cmp(a: &str, b: &str) -> Option<Ordering> {
    let x = parse_decimal(a)?;
    let y = parse_decimal(b)?;
    Some(x.cmp_value(&y))
}

/// Sign, significant digits (most significant first, trailing zeros
/// stripped) and the power of ten of the last digit.
struct ParsedDecimal {
    negative: bool,
    digits: Vec<u8>,
    exponent: i64,
}

impl ParsedDecimal {
    fn is_zero(&self) -> bool {
        self.digits.is_empty()
    }

    /// Power of ten of the most significant digit.
    fn magnitude(&self) -> i64 {
        self.exponent + self.digits.len() as i64 - 1
    }

    fn cmp_value(&self, other: &ParsedDecimal) -> Ordering {
        match (self.is_zero(), other.is_zero()) {
            (true, true) => return Ordering::Equal,
            (true, false) => {
                return if other.negative {
                    Ordering::Greater
                } else {
                    Ordering::Less
                }
            }
            (false, true) => {
                return if self.negative {
                    Ordering::Less
                } else {
                    Ordering::Greater
                }
            }
            (false, false) => {}
        }
        match (self.negative, other.negative) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (negative, _) => {
                let by_magnitude = self
                    .magnitude()
                    .cmp(&other.magnitude())
                    .then_with(|| self.digits.cmp(&other.digits));
                if negative {
                    by_magnitude.reverse()
                } else {
                    by_magnitude
                }
            }
        }
    }
}

fn parse_decimal(literal: &str) -> Option<ParsedDecimal> {
    let s = literal.trim();
    let mut rest = s;
    let mut negative = false;
    if let Some(stripped) = rest.strip_prefix('-') {
        negative = true;
        rest = stripped;
    } else if let Some(stripped) = rest.strip_prefix('+') {
        rest = stripped;
    }

    let (mantissa, exp_part) = match rest.find(|c| c == 'e' || c == 'E') {
        Some(pos) => (&rest[..pos], Some(&rest[pos + 1..])),
        None => (rest, None),
    };
    let exp10: i64 = match exp_part {
        Some(e) => e.parse().ok()?,
        None => 0,
    };

    let (int_part, frac_part) = match mantissa.find('.') {
        Some(pos) => (&mantissa[..pos], &mantissa[pos + 1..]),
        None => (mantissa, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !int_part.bytes().all(|b| b.is_ascii_digit())
        || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes())
        .map(|b| b - b'0')
        .skip_while(|&d| d == 0)
        .collect();
    let mut exponent = exp10 - frac_part.len() as i64;
    while digits.last() == Some(&0) {
        digits.pop();
        exponent += 1;
    }
    if digits.is_empty() {
        negative = false;
    }

    Some(ParsedDecimal {
        negative,
        digits,
        exponent,
    })
}
