/// The page embedding the consent banner.
pub trait PageHost {
    fn set_banner_visible(&mut self, visible: bool);

    /// Full page reload, requested after consent is cleared.
    fn reload(&mut self);
}

impl<H: PageHost + ?Sized> PageHost for &mut H {
    fn set_banner_visible(&mut self, visible: bool) {
        (**self).set_banner_visible(visible)
    }

    fn reload(&mut self) {
        (**self).reload()
    }
}
