macro_rules! cfg_ticker {
    ($($item:item)*) => {
        $(
            #[cfg(feature = "ticker")]
            #[cfg_attr(docsrs, doc(cfg(feature = "ticker")))]
            $item
        )*
    }
}

macro_rules! cfg_test_util {
    ($($item:item)*) => {
        $(
            #[cfg(any(test, feature = "test-util"))]
            #[cfg_attr(docsrs, doc(cfg(feature = "test-util")))]
            $item
        )*
    }
}
