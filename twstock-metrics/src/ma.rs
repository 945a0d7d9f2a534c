use crate::bar::{AnnotatedBar, PriceBar};

/// 均线周期
pub const MA5: usize = 5;
pub const MA20: usize = 20;
pub const MA60: usize = 60;

/// 保留两位小数
///
/// 放大100倍后按f64::round四舍五入（远离零），再缩小100倍
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// MA计算
///
/// 给定序列，计算周期为period的简单移动平均，结果与输入等长。
/// 设收盘价P(n)，下标n从0开始。
/// n < period - 1 时 MA(n) 不存在；
/// 否则 MA(n) = round2((P(n) + P(n-1) + ... + P(n-period+1)) / period)
/// 窗口内存在非有限值时 MA(n) 不存在
pub fn sma<D, P>(raw: &[D], period: usize, pf: P) -> Vec<Option<f64>>
where
    P: Fn(&D) -> f64,
{
    if period == 0 {
        return vec![None; raw.len()];
    }
    let pv = period as f64;
    (0..raw.len())
        .map(|i| {
            if i + 1 < period {
                return None;
            }
            // 由新到旧累加，每个窗口独立求和
            let mut acc = 0.0;
            for j in 0..period {
                acc += pf(&raw[i - j]);
            }
            let avg = round2(acc / pv);
            if avg.is_finite() {
                Some(avg)
            } else {
                None
            }
        })
        .collect()
}

/// 为日K线序列附加MA5/MA20/MA60
pub fn annotate(bars: &[PriceBar]) -> Vec<AnnotatedBar> {
    let ma5 = sma(bars, MA5, |b| b.close);
    let ma20 = sma(bars, MA20, |b| b.close);
    let ma60 = sma(bars, MA60, |b| b.close);
    bars.iter()
        .zip(ma5.into_iter())
        .zip(ma20.into_iter())
        .zip(ma60.into_iter())
        .map(|(((bar, ma5), ma20), ma60)| AnnotatedBar {
            bar: bar.clone(),
            ma5,
            ma20,
            ma60,
        })
        .collect()
}
