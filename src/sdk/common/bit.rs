#[macro_export]
macro_rules! BIT {
    ( $x:expr ) => {
        (1 << ($x))
    };
}

#[macro_export]
macro_rules! BIT_MASK_LEN {
    ( $x:expr ) => {
        ($crate::BIT!($x) - 1)
    };
}

// bits range: BIT_RNG(3, 5)  0b00111000,  start from 3, end at 5
#[macro_export]
macro_rules! BIT_RNG {
    ( $s:expr, $e:expr ) => {
        ($crate::BIT_MASK_LEN!(($e) - ($s) + 1) << ($s))
    };
}

#[macro_export]
macro_rules! BM_SET {
    ( $x:expr, $mask:expr ) => {
        $x |= $mask
    };
}

#[macro_export]
macro_rules! BM_CLR {
    ( $x:expr, $mask:expr ) => {
        $x &= !($mask)
    };
}

#[macro_export]
macro_rules! BM_FLIP {
    ( $x:expr, $mask:expr ) => {
        $x ^= $mask
    };
}

#[macro_export]
macro_rules! BM_IS_SET {
    ( $x:expr, $mask:expr ) => {
        (($x) & ($mask)) != 0
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_bit_ranges() {
        let low: u8 = BIT_RNG!(0, 2);
        let mid: u8 = BIT_RNG!(3, 5);
        let top: u8 = BIT_RNG!(7, 7);

        assert_eq!(low, 0b0000_0111);
        assert_eq!(mid, 0b0011_1000);
        assert_eq!(top, 0b1000_0000);
    }

    #[test]
    fn test_bit_manipulation() {
        let mut val: u8 = 0b1010_0000;

        BM_SET!(val, BIT!(0));
        assert_eq!(val, 0b1010_0001);

        BM_CLR!(val, BIT!(7));
        assert_eq!(val, 0b0010_0001);

        BM_FLIP!(val, 0xFF);
        assert_eq!(val, 0b1101_1110);

        assert!(BM_IS_SET!(val, BIT!(1)));
        assert!(!BM_IS_SET!(val, BIT!(0)));
    }
}
