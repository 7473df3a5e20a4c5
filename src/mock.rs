use std::{fmt::Debug, sync::Mutex};

type Executor<OUTPUT, INPUT> = Box<dyn Fn(INPUT) -> OUTPUT + Sync + Send>;

/// Records every call and answers through a replaceable executor.
pub struct Mock<OUTPUT: Send + Sync, INPUT: Send + Sync = ()>
where
    INPUT: Clone,
{
    executor: Executor<OUTPUT, INPUT>,
    calls: Mutex<Vec<INPUT>>,
}
impl<OUTPUT: Send + Sync, INPUT: Clone + Send + Sync> Default for Mock<OUTPUT, INPUT> {
    fn default() -> Self {
        Self::new()
    }
}
impl<OUTPUT: Sync + Send, INPUT: Clone + Send + Sync> Mock<OUTPUT, INPUT> {
    pub fn new() -> Self {
        Self {
            executor: Box::new(|_| panic!("Mock executor not set")),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn returning(self, output: OUTPUT) -> Mock<OUTPUT, INPUT>
    where
        OUTPUT: Clone + 'static,
    {
        self.fake(move |_| output.clone())
    }

    pub fn fake<T>(self, fake: T) -> Mock<OUTPUT, INPUT>
    where
        T: Fn(INPUT) -> OUTPUT + 'static + Send + Sync,
    {
        Self {
            executor: Box::new(fake),
            calls: self.calls,
        }
    }

    pub fn call(&self, input: INPUT) -> OUTPUT {
        self.calls.lock().unwrap().push(input.clone());
        (self.executor)(input)
    }

    pub fn get_calls(&self) -> Vec<INPUT> {
        self.calls.lock().unwrap().clone()
    }

    pub fn get_nth_call(&self, index: usize) -> Option<INPUT> {
        self.calls.lock().unwrap().get(index).cloned()
    }
}

impl<OUTPUT: Send + Sync, INPUT: Clone + Send + Sync> Mock<OUTPUT, INPUT> {
    pub fn assert_called_times(&self, times: usize) {
        let calls = self.calls.lock().unwrap();
        assert_eq!(calls.len(), times);
    }
    pub fn assert_not_called(&self) {
        self.assert_called_times(0)
    }
    pub fn assert_nth_call(&self, n: usize, input: INPUT)
    where
        INPUT: PartialEq + Debug,
    {
        assert_eq!(self.get_nth_call(n), Some(input), "call #{} differs", n);
    }
    pub fn assert_first_call(&self, input: INPUT)
    where
        INPUT: PartialEq + Debug,
    {
        self.assert_nth_call(0, input)
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn it_must_return_specified_value() {
        let mock: Mock<i32> = Mock::new().returning(42);
        assert_eq!(mock.call(()), 42);
        assert_eq!(mock.call(()), 42);
    }

    #[test]
    #[should_panic(expected = "Mock executor not set")]
    fn it_must_panic_without_executor() {
        let mock: Mock<i32> = Mock::new();
        mock.call(());
    }

    mod fake {
        use super::*;

        #[test]
        fn it_must_pass_input_to_fake() {
            let mock: Mock<usize, String> = Mock::new().fake(|s: String| s.len());
            assert_eq!(mock.call("four".to_string()), 4);
        }
    }

    mod recording {
        use super::*;

        #[test]
        fn it_must_return_calls_in_order() {
            let mock: Mock<i32, i32> = Mock::new().fake(|_| 0);
            mock.call(12);
            mock.call(13);

            assert_eq!(mock.get_calls(), vec![12, 13]);
            mock.assert_nth_call(1, 13);
            mock.assert_called_times(2);
        }

        #[test]
        #[should_panic]
        fn it_must_fail_on_wrong_nth_call() {
            let mock: Mock<i32, i32> = Mock::new().fake(|_| 0);
            mock.call(12);
            mock.assert_first_call(99);
        }
    }
}
